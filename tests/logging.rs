//! Exercises the one-shot Urey-Bradley warning path. `env_logger` is only
//! initialized here so a developer running with `RUST_LOG=warn` can see the
//! message; the test itself only needs the evaluator to succeed.

use std::collections::HashMap;

use ffeval::topology::params::{AtomTypeParams, UreyBradleyParams};
use ffeval::topology::ParameterSet;
use ffeval::{Evaluator, EvaluatorConfig, Topology};

#[test]
fn urey_bradley_terms_are_detected_but_do_not_block_construction() {
    let _ = env_logger::try_init();

    let topo = Topology::new(
        vec!["OW".into(), "HW".into(), "HW".into()],
        vec![-0.834, 0.417, 0.417],
        vec![],
        vec![],
        vec![],
        vec![],
    )
    .unwrap();

    let mut atom_types = HashMap::new();
    atom_types.insert(
        "OW".to_string(),
        AtomTypeParams {
            sigma: 3.15,
            epsilon: 0.15,
            sigma_14: 3.15,
            epsilon_14: 0.15,
        },
    );
    atom_types.insert("HW".to_string(), atom_types["OW"]);

    let params = ParameterSet {
        atom_types,
        urey_bradley_types: vec![(
            vec!["HW".into(), "OW".into(), "HW".into()],
            UreyBradleyParams { k: 30.0 },
        )],
        ..Default::default()
    };

    assert!(Evaluator::new(&topo, &params, EvaluatorConfig::default()).is_ok());
}
