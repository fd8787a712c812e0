use chromastats_normalize::*;
use chromastats_types::{read_stats_file, top_level_modules};
use serde_json::{Value, json};
use std::path::Path;

// Base directory the sample was "built" in
const SANDBOX_DIR: &str = "/workspace/sandboxes/react-18";

fn load_sample() -> anyhow::Result<Value> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/samples/preview-stats.json");
    Ok(read_stats_file(&path)?)
}

fn normalized_sample() -> anyhow::Result<(Value, NormalizeSummary)> {
    let document = load_sample()?;
    Ok(StatsNormalizer::with_base_dir(SANDBOX_DIR).normalize_with_summary(document))
}

#[test]
fn test_sample_summary() -> anyhow::Result<()> {
    let (_, summary) = normalized_sample()?;

    assert_eq!(
        summary,
        NormalizeSummary {
            normalizable: true,
            original_modules: 6,
            candidates: 8,
            added_modules: 8,
            promoted_stubs: 2,
        }
    );
    Ok(())
}

#[test]
fn test_sample_keeps_storybook_config_entry() -> anyhow::Result<()> {
    let (normalized, _) = normalized_sample()?;

    let config_entry = find_modules(&normalized, "./storybook-config-entry.js", MatchMode::Exact);
    assert!(
        config_entry
            .iter()
            .any(|m| m.id.as_deref() == Some("./storybook-config-entry.js"))
    );

    let stories_entry = find_modules(&normalized, "./storybook-stories.js", MatchMode::Exact);
    assert_eq!(stories_entry.len(), 1);
    assert_eq!(stories_entry[0].reasons, vec!["./storybook-config-entry.js"]);

    let dependents = dependents_of(&normalized, "./storybook-config-entry.js", MatchMode::Partial);
    assert!(!dependents.is_empty());
    Ok(())
}

#[test]
fn test_sample_lazy_module_traced_to_config_entry() -> anyhow::Result<()> {
    let (normalized, _) = normalized_sample()?;

    let lazy = find_modules(&normalized, "lazy recursive", MatchMode::Partial);
    assert_eq!(lazy.len(), 1);
    assert!(
        lazy[0]
            .reasons
            .iter()
            .any(|reason| reason.contains("./storybook-config-entry.js"))
    );
    Ok(())
}

#[test]
fn test_sample_appended_modules() -> anyhow::Result<()> {
    let (normalized, _) = normalized_sample()?;
    let modules = top_level_modules(&normalized).unwrap();
    let original = load_sample()?;

    assert_eq!(modules.len(), 14);
    assert_eq!(&modules[..6], top_level_modules(&original).unwrap().as_slice());

    assert_eq!(
        modules[6],
        json!({
            "id": "storybook-config-entry.js",
            "name": "storybook-config-entry.js",
            "modules": [
                {"name": "./storybook-config-entry.js"},
                {"name": "./storybook-stories.js"}
            ]
        })
    );
    assert_eq!(
        modules[7],
        json!({"id": "./storybook-config-entry.js", "name": "./storybook-config-entry.js"})
    );
    assert_eq!(
        modules[9],
        json!({
            "id": 7,
            "name": "../../node_modules/.pnpm/react@18.3.1/node_modules/react/index.js",
            "reasons": [
                {"moduleName": "src/Button.tsx"},
                {"moduleName": "../../node_modules/.pnpm/react-dom@18.3.1/node_modules/react-dom/client.js + 1 modules"}
            ]
        })
    );
    assert_eq!(
        modules[10],
        json!({
            "id": "src/Header.tsx",
            "name": "src/Header.tsx",
            "modules": [
                {"name": "./src/Header.tsx"},
                {"name": "./src/header.css"}
            ],
            "reasons": [
                {"moduleName": "src/Header.stories.tsx"},
                {"moduleName": "./src/Page.tsx"}
            ]
        })
    );

    let promoted: Vec<&str> = modules[12..]
        .iter()
        .filter_map(|m| m["name"].as_str())
        .collect();
    assert_eq!(promoted, vec!["./src/Page.tsx", "./src/page.css"]);
    for stub in &modules[12..] {
        assert_eq!(stub["id"], stub["name"]);
        assert_eq!(stub["reasons"], json!([{"moduleName": "./src/Page.stories.tsx"}]));
    }
    Ok(())
}

#[test]
fn test_sample_satisfies_contract_after_normalization() -> anyhow::Result<()> {
    let (normalized, _) = normalized_sample()?;
    let report = check_contract(&normalized);

    assert!(report.is_ok(), "{:?}", report.violations);
    assert_eq!(report.modules, 14);
    // stubs of the renamed id-less Header group stay unpromoted
    assert_eq!(report.warnings.len(), 3);
    Ok(())
}

#[test]
fn test_sample_normalization_is_stable() -> anyhow::Result<()> {
    let normalizer = StatsNormalizer::with_base_dir(SANDBOX_DIR);
    let once = normalizer.normalize(load_sample()?);
    let twice = normalizer.normalize(once.clone());

    assert_eq!(once, twice);
    Ok(())
}
