//! # Property Tests
//!
//! Arbitrary traces against arbitrary machines. Pools are always larger than
//! the architectural register count, which guarantees forward progress.

use procsim_core::common::{ARCH_REG_COUNT, ArchReg};
use procsim_core::config::{Config, FuUnitsConfig};
use procsim_core::isa::{FuClass, Instruction};
use procsim_core::{SimStats, Simulator};
use proptest::prelude::*;

fn arb_reg() -> impl Strategy<Value = Option<ArchReg>> {
    prop::option::of((0..ARCH_REG_COUNT).prop_map(|i| ArchReg::new(i).unwrap()))
}

fn arb_instruction() -> impl Strategy<Value = Instruction> {
    (0..3usize, arb_reg(), arb_reg(), arb_reg(), any::<u32>()).prop_map(
        |(class, dest, src1, src2, address)| {
            let mut inst = Instruction::new(address, FuClass::ALL[class]).with_src(src1, src2);
            inst.dest = dest;
            inst
        },
    )
}

fn arb_trace(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Instruction>> {
    prop::collection::vec(arb_instruction(), len)
}

fn arb_config() -> impl Strategy<Value = Config> {
    (
        (1..4usize, 1..4usize, 1..4usize),
        1..6usize,
        1..16usize,
        prop::option::of(1..16usize),
        (ARCH_REG_COUNT + 1)..(ARCH_REG_COUNT + 24),
    )
        .prop_map(|((k0, k1, k2), width, rob_size, rs_size, preg_pool)| {
            let mut config = Config::default();
            config.units = FuUnitsConfig { k0, k1, k2 };
            config.pipeline.width = width;
            config.pipeline.rob_size = rob_size;
            config.pipeline.rs_size = rs_size;
            config.pipeline.preg_pool = preg_pool;
            config.general.record_timeline = true;
            config.general.check_invariants = true;
            config
        })
}

fn run(config: &Config, trace: Vec<Instruction>) -> SimStats {
    let mut sim = Simulator::new(config, trace.into_iter()).unwrap();
    let _ = sim.run().unwrap();
    sim.finish()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Every instruction is dispatched, fired and retired exactly once.
    #[test]
    fn prop_round_trip(config in arb_config(), trace in arb_trace(0..80)) {
        let len = trace.len() as u64;
        let stats = run(&config, trace);
        prop_assert_eq!(stats.instructions_dispatched, len);
        prop_assert_eq!(stats.instructions_fired, len);
        prop_assert_eq!(stats.instructions_retired, len);
        prop_assert_eq!(stats.fired_by_class.iter().sum::<u64>(), len);
        prop_assert!(stats.max_rob_occupancy <= config.pipeline.rob_size);
    }

    /// Retirement follows dispatch order, and each stage follows the previous one.
    #[test]
    fn prop_program_order(config in arb_config(), trace in arb_trace(1..60)) {
        let stats = run(&config, trace.clone());
        let timeline = stats.timeline.unwrap();
        prop_assert_eq!(timeline.len(), trace.len());

        let mut last_retire = 0;
        for (timing, inst) in timeline.iter().zip(&trace) {
            prop_assert_eq!(timing.address, inst.address);
            let fire = timing.fire.unwrap();
            let writeback = timing.writeback.unwrap();
            let retire = timing.retire.unwrap();
            prop_assert!(fire > timing.dispatch);
            prop_assert_eq!(writeback, fire + 1);
            prop_assert!(retire > writeback);
            prop_assert!(retire >= last_retire);
            last_retire = retire;
        }
        prop_assert_eq!(last_retire, stats.cycles);
    }

    /// Pool registers are conserved and the structures agree after every cycle.
    #[test]
    fn prop_register_conservation(config in arb_config(), trace in arb_trace(0..60)) {
        let mut sim = Simulator::new(&config, trace.into_iter()).unwrap();
        while !sim.is_finished() {
            sim.tick().unwrap();
            let state = sim.state();
            let in_use = (ARCH_REG_COUNT..state.prf.len())
                .filter(|&i| !state.prf.is_free(procsim_core::common::PhysReg(i)).unwrap())
                .count();
            prop_assert_eq!(state.prf.free_count() + in_use, config.pipeline.preg_pool);
            prop_assert!(state.rs.len() <= state.rob.len());
            prop_assert!(sim.check_invariants().is_ok());
        }
        // Once drained, exactly the RAT's pool mappings remain claimed.
        let state = sim.state();
        let mapped = state.rat.iter().filter(|(_, reg)| !reg.is_architectural()).count();
        prop_assert_eq!(state.prf.free_count() + mapped, config.pipeline.preg_pool);
    }

    /// Identical trace and configuration give identical statistics.
    #[test]
    fn prop_deterministic(config in arb_config(), trace in arb_trace(0..40)) {
        let a = serde_json::to_value(run(&config, trace.clone())).unwrap();
        let b = serde_json::to_value(run(&config, trace)).unwrap();
        prop_assert_eq!(a, b);
    }
}
