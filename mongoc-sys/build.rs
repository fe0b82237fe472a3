fn main() {
    println!("cargo:rerun-if-env-changed=MONGOC_LIB_DIR");
    println!("cargo:rerun-if-env-changed=MONGOC_STATIC");

    // Explicit override takes precedence over pkg-config.
    if let Ok(dir) = std::env::var("MONGOC_LIB_DIR") {
        let mode = if std::env::var_os("MONGOC_STATIC").is_some() {
            "static"
        } else {
            "dylib"
        };
        println!("cargo:rustc-link-search=native={}", dir);
        println!("cargo:rustc-link-lib={}=mongoc-1.0", mode);
        println!("cargo:rustc-link-lib={}=bson-1.0", mode);
        return;
    }

    match pkg_config::Config::new()
        .atleast_version("1.0.0")
        .probe("libmongoc-1.0")
    {
        Ok(_) => {}
        Err(err) => {
            // Last resort: emit plain link directives and let the system
            // linker search its default paths.
            println!("cargo:warning=pkg-config could not find libmongoc-1.0 ({err}); falling back to default link paths");
            println!("cargo:rustc-link-lib=mongoc-1.0");
            println!("cargo:rustc-link-lib=bson-1.0");
        }
    }
}
