use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CubistError::path_syntax("x")
            .to_string()
            .contains("path syntax error:")
    );
    assert!(
        CubistError::not_implemented("x")
            .to_string()
            .contains("not implemented:")
    );
    assert!(CubistError::numeric("x").to_string().contains("numeric error:"));
    assert!(
        CubistError::transform("x")
            .to_string()
            .contains("transform error:")
    );
    assert!(CubistError::style("x").to_string().contains("style error:"));
    assert!(
        CubistError::document("x")
            .to_string()
            .contains("document error:")
    );
}

#[test]
fn asset_not_found_lists_candidates() {
    let err = CubistError::AssetNotFound {
        name: "logo".to_string(),
        attempted: vec![
            std::path::PathBuf::from("logo"),
            std::path::PathBuf::from("assets/logo.svg"),
        ],
    };
    let text = err.to_string();
    assert!(text.contains("logo"));
    assert!(text.contains("assets/logo.svg"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CubistError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
