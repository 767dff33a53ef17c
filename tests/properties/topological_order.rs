//! Property tests for dependency ordering inside a package.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::rc::Rc;

use proptest::prelude::*;

use packsmith::domain::ports::NoopLogger;
use packsmith::infrastructure::visitors::{
    CheckDependencies, CheckDependenciesConfig, DeclaredDependencies,
};
use packsmith::{Descriptor, MemoryFs, PackageSpec, Packaging};

fn file(index: usize) -> String {
    format!("f{index}.js")
}

/// File count, acyclic edges (dependent, dependency) with dependent > dependency,
/// and the order files are listed in the package
fn dag() -> impl Strategy<Value = (usize, BTreeSet<(usize, usize)>, Vec<usize>)> {
    (1usize..9).prop_flat_map(|n| {
        let edges = proptest::collection::vec((0..n, 0..n), 0..=n * 2).prop_map(|pairs| {
            pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.max(b), a.min(b)))
                .collect::<BTreeSet<_>>()
        });
        let listed = Just((0..n).collect::<Vec<_>>()).prop_shuffle();
        (Just(n), edges, listed)
    })
}

/// Build one package holding every file; returns the final file order
fn packaged_order(n: usize, edges: &BTreeSet<(usize, usize)>, listed: &[usize]) -> Vec<String> {
    let fs = MemoryFs::new();
    for i in 0..n {
        fs.insert(PathBuf::from("src").join(file(i)), file(i));
    }
    let mut packaging = Packaging::new(Rc::new(fs), Rc::new(NoopLogger));
    packaging.set_source_directories(vec![PathBuf::from("src")]);

    let mut table: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (dependent, dependency) in edges {
        table.entry(file(*dependent)).or_default().push(file(*dependency));
    }
    let mut config = toml::value::Table::new();
    config.insert(
        "dependencies".into(),
        toml::Value::try_from(&table).expect("serializable table"),
    );
    packaging.add_visitor(Rc::new(
        DeclaredDependencies::from_config(&toml::Value::Table(config)).unwrap(),
    ));
    packaging.add_visitor(Rc::new(
        CheckDependencies::new(CheckDependenciesConfig::default()).unwrap(),
    ));

    let output = packaging
        .add_package(
            &PackageSpec::new("all.js")
                .with_builder(Descriptor::named("Concat"))
                .with_files(listed.iter().map(|&i| file(i))),
        )
        .unwrap();
    packaging.build().unwrap();
    assert_eq!(packaging.error_count(), 0);

    packaging
        .output(output)
        .source_files()
        .iter()
        .map(|&id| packaging.source(id).logical_path().to_string())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every dependency precedes its dependents, and no file is
    /// lost or duplicated by the reordering.
    #[test]
    fn property_dependencies_come_first((n, edges, listed) in dag()) {
        let order = packaged_order(n, &edges, &listed);

        prop_assert_eq!(order.len(), n);
        let position: BTreeMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();
        prop_assert_eq!(position.len(), n);
        for (dependent, dependency) in &edges {
            prop_assert!(
                position[file(*dependency).as_str()] < position[file(*dependent).as_str()],
                "{} should precede {} in {:?}",
                file(*dependency),
                file(*dependent),
                order
            );
        }
    }

    /// PROPERTY: Without edges, the listed order is kept as is.
    #[test]
    fn property_no_edges_keeps_listed_order(
        listed in (1usize..9).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
    ) {
        let order = packaged_order(listed.len(), &BTreeSet::new(), &listed);

        let expected: Vec<String> = listed.iter().map(|&i| file(i)).collect();
        prop_assert_eq!(order, expected);
    }
}
