//! Property-based tests for option validation

use oxbz_solver::{OptionValue, Options, SatEngine, SolverOption};
use proptest::prelude::*;

fn options() -> impl Strategy<Value = Options> {
    (
        (any::<bool>(), 0u32..=2, any::<bool>()),
        prop::sample::select(SatEngine::ALL.to_vec()),
        (any::<u32>(), 0u32..=4, 0u32..=3),
    )
        .prop_map(|(flags, sat_engine, levels)| Options {
            incremental: flags.0,
            produce_models: flags.1,
            produce_unsat_cores: flags.2,
            sat_engine,
            seed: levels.0,
            verbosity: levels.1,
            rewrite_level: levels.2,
        })
}

proptest! {
    /// Option snapshots survive JSON
    #[test]
    fn options_json_round_trip(opts in options()) {
        let json = serde_json::to_string(&opts).unwrap();
        let back: Options = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, opts);
    }

    /// Every value read back with `get` is accepted by `set`
    #[test]
    fn get_values_are_settable(opts in options()) {
        let mut fresh = Options::default();
        for option in SolverOption::ALL {
            fresh.set(option, opts.get(option)).unwrap();
        }
        prop_assert_eq!(fresh, opts);
    }

    /// Out-of-domain numbers are rejected and leave the options unchanged
    #[test]
    fn out_of_range_is_rejected(opts in options(), n in 5u32..) {
        let mut target = opts.clone();
        for option in [
            SolverOption::Incremental,
            SolverOption::ProduceModels,
            SolverOption::ProduceUnsatCores,
            SolverOption::Verbosity,
            SolverOption::RewriteLevel,
        ] {
            let err = target.set(option, OptionValue::Numeric(n)).unwrap_err();
            prop_assert!(err.to_string().contains("invalid option value"));
        }
        prop_assert_eq!(target, opts);
    }
}
