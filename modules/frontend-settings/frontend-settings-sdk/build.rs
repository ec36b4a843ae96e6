fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/frontend_settings/v1/frontend_settings.proto");
    println!("cargo:rerun-if-changed=proto");

    tonic_prost_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(
            &["proto/frontend_settings/v1/frontend_settings.proto"],
            &["proto"],
        )?;

    Ok(())
}
