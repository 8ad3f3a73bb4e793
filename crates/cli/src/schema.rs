use clientspec_api::ApiSpec;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let schema = schemars::schema_for!(ApiSpec);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
