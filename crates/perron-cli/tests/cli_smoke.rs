use assert_cmd::Command;

fn cli() -> Command {
    let exe = assert_cmd::cargo_bin!("perron-cli");
    let mut cmd = Command::new(exe);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf-8 stdout")
}

fn parse_vector(line: &str) -> Vec<f64> {
    let inner = line
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .expect("bracketed vector");
    inner
        .split(',')
        .map(|s| s.trim().parse::<f64>().expect("float component"))
        .collect()
}

#[test]
fn prints_eigenvalue_then_eigenvector() {
    let out = stdout_of(cli().args(["3", "[[1],[2],[0]]"]));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected output: {out:?}");

    let value: f64 = lines[0].parse().expect("float eigenvalue");
    assert!((value - 1.0).abs() < 1e-9);

    let vector = parse_vector(lines[1]);
    assert_eq!(vector.len(), 3);
    let expected = 1.0 / 3f64.sqrt();
    for x in vector {
        assert!((x.abs() - expected).abs() < 1e-9);
    }
}

#[test]
fn whole_eigenvalues_print_as_float_literals() {
    let out = stdout_of(cli().args(["1", "[[0]]"]));
    assert_eq!(out, "1.0\n[1.0]\n");
}

#[test]
fn reads_adjacency_list_from_stdin() {
    let out = stdout_of(cli().args(["2", "-"]).write_stdin("[[1],[0]]\n"));
    let value: f64 = out.lines().next().unwrap().parse().unwrap();
    assert!((value - 1.0).abs() < 1e-9);
}

#[test]
fn json_output_with_spectrum() {
    let out = stdout_of(cli().args([
        "--format",
        "json",
        "--spectrum",
        "4",
        "[[1,2,3],[0,2,3],[0,1,3],[0,1,2]]",
    ]));
    let json: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(json["size"], 4);
    let value = json["eigenvalue"].as_f64().unwrap();
    assert!((value - 3.0).abs() < 1e-8);
    assert_eq!(json["eigenvector"].as_array().unwrap().len(), 4);
    assert_eq!(json["spectrum"].as_array().unwrap().len(), 4);
}

#[test]
fn complete_digraph_on_thirty_vertices() {
    let rows: Vec<Vec<usize>> = (0..30)
        .map(|i| (0..30).filter(|&j| j != i).collect())
        .collect();
    let literal = serde_json::to_string(&rows).unwrap();
    let out = stdout_of(cli().args(["30", literal.as_str()]));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected output: {out:?}");

    let value: f64 = lines[0].parse().expect("float eigenvalue");
    assert!((value - 29.0).abs() < 1e-8, "got {value}");

    let vector = parse_vector(lines[1]);
    assert_eq!(vector.len(), 30);
    let expected = 1.0 / 30f64.sqrt();
    for x in vector {
        assert!((x.abs() - expected).abs() < 1e-8);
    }
}

#[test]
fn runs_are_repeatable() {
    let a = stdout_of(cli().args(["4", "[[1,2],[2],[0,1],[0]]"]));
    let b = stdout_of(cli().args(["4", "[[1,2],[2],[0,1],[0]]"]));
    assert_eq!(a, b);
}

#[test]
fn empty_graph_fails_cleanly() {
    let assert = cli().args(["0", "[]"]).assert().code(1);
    let output = assert.get_output();
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no vertices"));
}

#[test]
fn malformed_literal_is_an_argument_error() {
    let assert = cli().args(["2", "[[1], [0]"]).assert().code(2);
    assert!(assert.get_output().stdout.is_empty());
}

#[test]
fn code_like_literal_is_rejected() {
    cli()
        .args(["1", "__import__('os').system('true')"])
        .assert()
        .code(2);
}

#[test]
fn non_integer_size_is_an_argument_error() {
    cli().args(["three", "[[]]"]).assert().code(2);
}

#[test]
fn out_of_range_target_fails() {
    let assert = cli().args(["2", "[[2],[]]"]).assert().code(1);
    assert!(String::from_utf8_lossy(&assert.get_output().stderr).contains("0 -> 2"));
}

#[test]
fn missing_arguments_print_usage() {
    let assert = cli().assert().code(2);
    assert!(String::from_utf8_lossy(&assert.get_output().stderr).contains("USAGE"));
}
