fn main() {
    // Rerun if embedded assets change
    println!("cargo:rerun-if-changed=assets/");

    // rust-embed needs the folder to exist at compile time
    let assets_path = std::path::Path::new("assets");
    if !assets_path.exists() {
        eprintln!("Warning: assets/ directory not found, embedding a placeholder index.html.");

        std::fs::create_dir_all("assets").ok();
        std::fs::write(
            "assets/index.html",
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Squeeze</title>
</head>
<body>
    <h1>Squeeze</h1>
    <p>No assets embedded.</p>
</body>
</html>"#,
        )
        .ok();
    }
}
