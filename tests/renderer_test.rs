use templproc::pattern::Delimiter;
use templproc::renderer::{substitute, LiteralRenderer, TemplateRenderer};
use templproc::scanner::scan_placeholders;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_substitute_counts_occurrences() {
    let rendered = substitute(
        "Host=@HOST@ Port=@PORT@ Again=@HOST@",
        &strings(&["@HOST@", "@PORT@"]),
        &strings(&["web1", "8080"]),
    );
    assert_eq!(rendered.content, "Host=web1 Port=8080 Again=web1");
    assert_eq!(rendered.replacements, 3);
}

#[test]
fn test_longest_pattern_first() {
    let rendered = substitute(
        "short=@HOST@ long=@HOSTNAME@",
        &strings(&["@HOST@", "@HOSTNAME@"]),
        &strings(&["h1", "h2"]),
    );
    assert_eq!(rendered.content, "short=h1 long=h2");
}

#[test]
fn test_shorter_token_inside_longer_token() {
    // "@A@" occurs inside "@A@B@"; the longer token has to win.
    let rendered =
        substitute("x=@A@B@ y=@A@", &strings(&["@A@", "@A@B@"]), &strings(&["1", "2"]));
    assert_eq!(rendered.content, "x=2 y=1");
    assert_eq!(rendered.replacements, 2);
}

#[test]
fn test_absent_pattern_contributes_nothing() {
    let rendered =
        substitute("Host=@HOST@", &strings(&["@HOST@", "@PORT@"]), &strings(&["web1", "80"]));
    assert_eq!(rendered.content, "Host=web1");
    assert_eq!(rendered.replacements, 1);
}

#[test]
fn test_only_overlapping_prefix_is_paired() {
    let rendered = substitute("@A@ @B@", &strings(&["@A@", "@B@"]), &strings(&["1"]));
    assert_eq!(rendered.content, "1 @B@");

    let rendered = substitute("@A@", &strings(&["@A@"]), &strings(&["1", "ignored"]));
    assert_eq!(rendered.content, "1");
}

#[test]
fn test_full_rows_leave_no_placeholders() {
    let patterns = strings(&["@HOST@", "@IP@", "@PORT@"]);
    let renderer = LiteralRenderer::new(&patterns);
    let template = "@HOST@ @IP@:@PORT@\n# @PORT@ @HOST@";
    for row in [strings(&["a", "1.1.1.1", "1"]), strings(&["b", "2.2.2.2", "2", "extra"])] {
        let rendered = renderer.render(template, &row);
        assert!(scan_placeholders(&rendered.content, Delimiter::At).is_empty());
    }
}
