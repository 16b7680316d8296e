//! Integration tests for `cotiza order`: the headless replay of an
//! operator session into the per-supplier order workbook.
#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::process::Command;

use rust_xlsxwriter::Workbook;

/// Path to the compiled `cotiza` binary.
fn cotiza_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("cotiza");
    path
}

/// Writes a one-sheet price list fixture.
fn write_price_list(path: &Path, rows: &[(&str, &str, &str)]) {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "SKU").expect("header");
    ws.write_string(0, 1, "Nombre").expect("header");
    ws.write_string(0, 2, "Precio Unitario").expect("header");
    for (i, (sku, name, price)) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        ws.write_string(r, 0, *sku).expect("sku");
        ws.write_string(r, 1, *name).expect("name");
        ws.write_string(r, 2, *price).expect("price");
    }
    wb.save(path).expect("save fixture");
}

#[test]
fn order_replays_a_session_and_writes_the_workbook() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = dir.path().join("farmacos_sa.xlsx");
    let b = dir.path().join("distribuidora_mx.xlsx");
    write_price_list(&a, &[("001", "Aspirina", "10.0000"), ("002", "Gasas", "4.00")]);
    write_price_list(&b, &[("001", "Aspirina", "10.0000")]);

    let resolutions = dir.path().join("resoluciones.json");
    std::fs::write(&resolutions, r#"{ "001": "farmacos_sa" }"#).expect("write resolutions");

    let quantities = dir.path().join("cantidades.json");
    std::fs::write(
        &quantities,
        r#"[
            { "supplier": "farmacos_sa", "sku": "001", "quantity": 3 },
            { "supplier": "farmacos_sa", "sku": "002", "quantity": 2 }
        ]"#,
    )
    .expect("write quantities");

    let out_dir = dir.path().join("resultados");
    let out = Command::new(cotiza_bin())
        .args([
            "order",
            a.to_str().expect("path"),
            b.to_str().expect("path"),
            "--resolutions",
            resolutions.to_str().expect("path"),
            "--quantities",
            quantities.to_str().expect("path"),
            "--out",
            out_dir.to_str().expect("path"),
        ])
        .output()
        .expect("run cotiza order");

    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Empates resueltos: 1/1"), "stdout: {stdout}");
    // 3 × $10.00 + 2 × $4.00
    assert!(stdout.contains("Total general: $38.00"), "stdout: {stdout}");

    let written: Vec<_> = std::fs::read_dir(&out_dir)
        .expect("read out dir")
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(written.len(), 1);
    assert!(written[0].starts_with("pedido_por_proveedor_"), "{written:?}");
}

#[test]
fn stale_resolutions_are_warned_and_skipped_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = dir.path().join("prov.xlsx");
    write_price_list(&a, &[("001", "Gasas", "5.00")]);

    // 001 is a unique winner, so this stored choice is stale.
    let resolutions = dir.path().join("resoluciones.json");
    std::fs::write(&resolutions, r#"{ "001": "prov" }"#).expect("write resolutions");

    let out_dir = dir.path().join("resultados");
    let out = Command::new(cotiza_bin())
        .args([
            "order",
            a.to_str().expect("path"),
            "--resolutions",
            resolutions.to_str().expect("path"),
            "--out",
            out_dir.to_str().expect("path"),
        ])
        .output()
        .expect("run cotiza order");

    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("aviso"), "stderr: {stderr}");
    let stdout = String::from_utf8_lossy(&out.stdout);
    // The untouched winner line still exports with quantity 0.
    assert!(stdout.contains("Total general: $0.00"), "stdout: {stdout}");
}

#[test]
fn malformed_quantities_json_exits_2() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = dir.path().join("prov.xlsx");
    write_price_list(&a, &[("001", "Gasas", "5.00")]);

    let quantities = dir.path().join("cantidades.json");
    std::fs::write(&quantities, "{ not json").expect("write quantities");

    let out = Command::new(cotiza_bin())
        .args([
            "order",
            a.to_str().expect("path"),
            "--quantities",
            quantities.to_str().expect("path"),
            "--out",
            dir.path().join("resultados").to_str().expect("path"),
        ])
        .output()
        .expect("run cotiza order");
    assert_eq!(out.status.code(), Some(2));
}
