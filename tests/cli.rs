use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn letsplot_api(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_letsplot-api"))
        .current_dir(root)
        .args(["--format", "plain"])
        .args(args)
        .output()
        .unwrap()
}

fn with_bundle(source: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let assets = dir.path().join("src/ggoat/assets");
    fs::create_dir_all(&assets).unwrap();
    fs::write(assets.join("lets-plot.min.js"), source).unwrap();
    dir
}

#[test]
fn missing_bundle_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();

    let autogen = letsplot_api(dir.path(), &["autogen"]);
    assert!(!autogen.status.success());
    assert!(String::from_utf8_lossy(&autogen.stderr).contains("lets-plot.min.js not found"));
    assert!(!dir.path().join("src/ggoat/autogen").exists());

    let scan = letsplot_api(dir.path(), &["scan", "--stubs"]);
    assert!(!scan.status.success());
    assert!(scan.stdout.is_empty());
}

#[test]
fn scan_stubs_go_to_stdout() {
    let dir = with_bundle("geom_point:function(){},corr_plot=function(){}");

    let output = letsplot_api(dir.path(), &["scan", "--stubs"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("# lets-plot.min.js API scan\n"));
    assert!(stdout.contains("Geoms:      ['point']\n"));
    assert!(stdout.contains("# --- Python stubs for missing features (template) ---"));
    assert!(stdout.contains("def geom_point(*args, **kwargs):"));
    assert!(stdout.contains("raise NotImplementedError('Implement bistro_corr_plot in ggoat')"));
    assert!(!dir.path().join("src/ggoat/autogen").exists());
}

#[test]
fn scan_without_stubs_prints_report_only() {
    let dir = with_bundle("");

    let output = letsplot_api(dir.path(), &["scan"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Geospatial: []\n"));
    assert!(!stdout.contains("def "));
}

#[test]
fn autogen_prints_one_line_per_category() {
    let dir = with_bundle("scale_x_log10 = function(){}; scale_color_manual = function(){};");

    let output = letsplot_api(dir.path(), &["autogen", "--out", "gen"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let summary: Vec<&str> = stdout.lines().filter(|l| l.starts_with("- ")).collect();
    assert_eq!(summary.len(), 8);
    assert!(stdout.contains("scales_autogen.py : 2 functions generated"));
    assert!(dir.path().join("gen/scales_autogen.py").is_file());
}
