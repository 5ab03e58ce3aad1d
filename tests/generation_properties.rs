use gpgym::engines::generation::{build_population, generate_program, GenerationMethod};
use gpgym::functions::{Catalog, FunctionSpec, TerminalSpec};
use gpgym::{GpError, Program, TypeToken};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// Two types: numbers and booleans, with functions crossing between them
fn mixed_catalog() -> Catalog {
    let mut terminals = BTreeMap::new();
    terminals.insert("x".to_string(), TerminalSpec::new("num"));
    terminals.insert("y".to_string(), TerminalSpec::new("num"));
    terminals.insert("yes".to_string(), TerminalSpec::new("bool"));

    let mut functions = BTreeMap::new();
    functions.insert(
        "add".to_string(),
        FunctionSpec::new("num", vec!["num".into(), "num".into()]),
    );
    functions.insert(
        "if".to_string(),
        FunctionSpec::new("num", vec!["bool".into(), "num".into(), "num".into()]),
    );
    functions.insert(
        "lte".to_string(),
        FunctionSpec::new("bool", vec!["num".into(), "num".into()]),
    );
    functions.insert(
        "not".to_string(),
        FunctionSpec::new("bool", vec!["bool".into()]),
    );
    Catalog::new(terminals, functions).unwrap()
}

fn terminals_only() -> Catalog {
    let mut terminals = BTreeMap::new();
    terminals.insert("x".to_string(), TerminalSpec::new("num"));
    terminals.insert("y".to_string(), TerminalSpec::new("num"));
    Catalog::new(terminals, BTreeMap::new()).unwrap()
}

#[test]
fn test_generated_programs_are_well_typed() {
    let catalog = mixed_catalog();
    let num = TypeToken::from("num");

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        for method in [GenerationMethod::Grow, GenerationMethod::Full] {
            let program = generate_program(&catalog, 4, method, 0.3, &num, &mut rng).unwrap();
            catalog.check(&program, &num).unwrap();
        }
    }
}

#[test]
fn test_height_never_exceeds_depth_budget() {
    let catalog = mixed_catalog();
    let num = TypeToken::from("num");
    let mut rng = StdRng::seed_from_u64(123);

    for depth in 0..6 {
        for _ in 0..30 {
            let program =
                generate_program(&catalog, depth, GenerationMethod::Grow, 0.2, &num, &mut rng)
                    .unwrap();
            assert!(program.height() <= depth, "{} exceeds {}", program, depth);
        }
    }
}

#[test]
fn test_full_method_reaches_exact_depth() {
    let catalog = mixed_catalog();
    let mut rng = StdRng::seed_from_u64(77);

    for depth in 0..6 {
        for ty in ["num", "bool"] {
            let program = generate_program(
                &catalog,
                depth,
                GenerationMethod::Full,
                0.9,
                &TypeToken::from(ty),
                &mut rng,
            )
            .unwrap();
            assert_eq!(program.height(), depth);
        }
    }
}

#[test]
fn test_full_leaves_all_at_same_depth() {
    fn leaf_depths(p: &Program, depth: usize, out: &mut Vec<usize>) {
        match p {
            Program::Atom(_) => out.push(depth),
            Program::Call { args, .. } => {
                for arg in args {
                    leaf_depths(arg, depth + 1, out);
                }
            }
        }
    }

    let catalog = mixed_catalog();
    let mut rng = StdRng::seed_from_u64(4);
    let program =
        generate_program(&catalog, 3, GenerationMethod::Full, 0.5, &"num".into(), &mut rng)
            .unwrap();
    let mut depths = Vec::new();
    leaf_depths(&program, 0, &mut depths);
    assert!(depths.iter().all(|&d| d == 3));
}

#[test]
fn test_empty_function_catalog_yields_atoms() {
    let catalog = terminals_only();
    let mut rng = StdRng::seed_from_u64(9);

    for depth in [0, 1, 5, 50] {
        for method in [GenerationMethod::Grow, GenerationMethod::Full] {
            for rate in [0.0, 0.5, 1.0] {
                let program =
                    generate_program(&catalog, depth, method, rate, &"num".into(), &mut rng)
                        .unwrap();
                assert!(program.is_atom());
                assert!(program.symbol() == "x" || program.symbol() == "y");
            }
        }
    }
}

#[test]
fn test_grow_with_terminal_only_catalog_returns_x_or_y() {
    let catalog = terminals_only();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut seen = std::collections::HashSet::new();

    for _ in 0..200 {
        let program =
            generate_program(&catalog, 5, GenerationMethod::Grow, 0.5, &"num".into(), &mut rng)
                .unwrap();
        assert!(matches!(&program, Program::Atom(name) if name == "x" || name == "y"));
        seen.insert(program.symbol().to_string());
    }
    assert_eq!(seen.len(), 2);
}

#[test]
fn test_single_symbol_full_tree() {
    let mut terminals = BTreeMap::new();
    terminals.insert("x".to_string(), TerminalSpec::new("num"));
    let mut functions = BTreeMap::new();
    functions.insert(
        "add".to_string(),
        FunctionSpec::new("num", vec!["num".into(), "num".into()]),
    );
    let catalog = Catalog::new(terminals, functions).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let program =
        generate_program(&catalog, 2, GenerationMethod::Full, 0.5, &"num".into(), &mut rng)
            .unwrap();

    let leaf = || Program::atom("x");
    let inner = || Program::call("add", vec![leaf(), leaf()]);
    assert_eq!(program, Program::call("add", vec![inner(), inner()]));
    assert_eq!(program.to_string(), "(add (add x x) (add x x))");
}

#[test]
fn test_function_without_matching_terminal_fails_at_leaf() {
    // `wrap` returns num but needs a `str` argument that no terminal provides
    let mut terminals = BTreeMap::new();
    terminals.insert("x".to_string(), TerminalSpec::new("num"));
    let mut functions = BTreeMap::new();
    functions.insert("wrap".to_string(), FunctionSpec::new("num", vec!["str".into()]));
    let catalog = Catalog::new(terminals, functions).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let result =
        generate_program(&catalog, 2, GenerationMethod::Full, 0.5, &"num".into(), &mut rng);
    assert!(matches!(result, Err(GpError::NoMatchingTerminal(t)) if t == TypeToken::from("str")));
}

#[test]
fn test_same_seed_same_population() {
    let catalog = mixed_catalog();
    let build = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        build_population(20, &catalog, 4, GenerationMethod::Grow, 0.3, &"num".into(), &mut rng)
            .unwrap()
    };
    assert_eq!(build(5), build(5));
    assert_eq!(build(5).len(), 20);
}
