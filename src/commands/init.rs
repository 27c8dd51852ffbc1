use mdpad::config::{DEFAULT_CONFIG_FILE, MdpadConfig};
use mdpad::util::absolute_path;

use crate::InitArgs;

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = absolute_path(&args.path)?;

    if !path.exists() {
        if args.create {
            tokio::fs::create_dir_all(&path).await?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let config_file = path.join(DEFAULT_CONFIG_FILE);
    if config_file.exists() {
        return Err(anyhow::anyhow!(
            "Config file already exists: {config_file}",
            config_file = config_file.display()
        ));
    }

    println!("Initializing notepad in {}", path.display());

    let config_text = serde_yaml::to_string(&MdpadConfig::default())?;
    tokio::fs::write(&config_file, config_text).await?;

    println!(
        "Created config file {config_file}",
        config_file = config_file.display()
    );

    Ok(())
}
