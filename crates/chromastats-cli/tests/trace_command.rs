use chromastats_testing::TestWorld;
use chromastats_testing::fixtures::SAMPLE_BASE_DIR;

fn sample_world() -> TestWorld {
    let world = TestWorld::new().with_base_dir(SAMPLE_BASE_DIR);
    world
        .copy_sample("preview-stats.json", "storybook-static/preview-stats.json")
        .unwrap();
    world
}

#[test]
fn test_trace_finds_storybook_config_entry() {
    let world = sample_world().json_output();

    let result = world
        .run(&["trace", "storybook-static", "./storybook-config-entry.js"])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let output = result.json().unwrap();
    let matches = output["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["id"], "./storybook-config-entry.js");
    assert_eq!(matches[0]["index"], 7);
}

#[test]
fn test_trace_lazy_module_importers() {
    let world = sample_world();

    let result = world
        .run(&["trace", "storybook-static", "lazy recursive", "--partial"])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(
        result
            .stdout()
            .contains("<- ./storybook-config-entry.js + 1 modules")
    );
}

#[test]
fn test_trace_dependents_reach_promoted_stubs() {
    let world = sample_world().json_output();

    let result = world
        .run(&["trace", "storybook-static", "./src/Page.stories.tsx", "--dependents"])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let output = result.json().unwrap();
    let names: Vec<&str> = output["dependents"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|module| module["name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec!["./src/Page.tsx + 1 modules", "./src/Page.tsx", "./src/page.css"]
    );
}

#[test]
fn test_trace_without_matches_succeeds() {
    let world = sample_world();

    let result = world
        .run(&["trace", "storybook-static", "./src/Missing.tsx"])
        .unwrap();

    assert!(result.success());
    assert!(result.stdout().contains("No modules match './src/Missing.tsx'"));
}
