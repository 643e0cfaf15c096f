use model_weights_visualizer::hierarchy::build_tree;
use model_weights_visualizer::render::{format_count, render_html, render_tree_fragment, HtmlConfig};
use pretty_assertions::assert_eq;

fn pairs() -> Vec<(&'static str, Vec<usize>)> {
    vec![
        ("encoder.layers.0.weight", vec![16, 16]),
        ("encoder.layers.0.bias", vec![16]),
        ("encoder.layers.1.weight", vec![16, 16]),
        ("Encoder.extra", vec![2]),
        ("decoder.proj", vec![16, 4]),
        ("logit_scale", vec![]),
    ]
}

#[test]
fn test_render_is_independent_of_input_order() {
    let forward = build_tree(pairs()).unwrap();

    let mut reversed_pairs = pairs();
    reversed_pairs.reverse();
    let reversed = build_tree(reversed_pairs).unwrap();

    let config = HtmlConfig::new().with_title("test");
    assert_eq!(
        render_html(&forward, Some(&config)),
        render_html(&reversed, Some(&config))
    );
    assert_eq!(render_html(&forward, Some(&config)), render_html(&forward, Some(&config)));
}

#[test]
fn test_siblings_sorted_by_code_point() {
    let html = render_tree_fragment(&build_tree(pairs()).unwrap());

    // Uppercase sorts before lowercase
    let positions: Vec<usize> = [">Encoder<", ">decoder<", ">encoder<", ">logit_scale<"]
        .iter()
        .map(|needle| html.find(needle).unwrap_or_else(|| panic!("missing {}", needle)))
        .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_group_headers_show_aggregates() {
    let html = render_tree_fragment(&build_tree(pairs()).unwrap());

    // encoder: 256 + 16 + 256
    assert!(html.contains(">528 params<"));
    // layers.0
    assert!(html.contains(">272 params<"));
    assert!(html.contains(">(256 params)<"));
    assert!(html.contains(">[16, 16]<"));
}

#[test]
fn test_first_top_level_group_starts_expanded() {
    let html = render_tree_fragment(&build_tree(pairs()).unwrap());

    assert_eq!(html.matches(r#"data-state="expanded""#).count(), 1);
    assert_eq!(html.matches("display: block").count(), 1);

    // "Encoder" is the first top-level group in code point order
    let mut lines = html.lines().skip_while(|line| !line.contains("module-header"));
    let header = lines.next().unwrap();
    assert!(header.contains(r#"data-state="expanded""#));
    let title = lines.next().unwrap();
    assert!(title.contains(">Encoder<"));
    assert!(title.contains("\u{25BC}"));
}

#[test]
fn test_large_counts_are_formatted() {
    let tree = build_tree(vec![("embed.weight", vec![32_000, 4_096]), ("norm", vec![4_096])]).unwrap();
    let html = render_html(&tree, None);

    assert!(html.contains(">131.07M params<"));
    assert!(html.contains(">(4.10K params)<"));
    assert_eq!(format_count(tree.total_params()), "131.08M");
    assert!(html.contains("2 tensors, 131.08M params"));
}

#[test]
fn test_empty_tree_renders_without_groups() {
    let tree = build_tree(Vec::<(String, Vec<usize>)>::new()).unwrap();
    let html = render_html(&tree, None);

    assert!(html.contains(r#"<div id="visualization">"#));
    assert!(!html.contains(r#"class="module"#));
    assert!(!html.contains(r#"class="parameter""#));
    assert!(html.contains("0 tensors, 0 params"));
}
