use std::io::{BufRead, Write};

use mdpad::Session;
use mdpad::config::MdpadConfig;

use crate::commands::open_session;
use crate::{FilesArgs, FilesCommand};

pub async fn run(args: &FilesArgs) -> Result<(), anyhow::Error> {
    let (config, config_path) = MdpadConfig::load_from_arg(args.config_file.as_deref())?;
    let mut session = open_session(&config, &config_path)?;

    match &args.command {
        FilesCommand::List => {
            for file in session.files().files() {
                let marker = if file.open { "*" } else { " " };
                println!("{marker} {name}", name = file.name);
            }
            // Listing never changes anything.
            return Ok(());
        }
        FilesCommand::New { name, content } => {
            let name = session.create(name.as_deref(), content.as_deref())?;
            println!("Created {name}");
        }
        FilesCommand::Show { name, raw } => {
            show(&session, name.as_deref(), *raw)?;
            return Ok(());
        }
        FilesCommand::Open { name } => {
            session.open(name)?;
            println!("Opened {name}");
        }
        FilesCommand::Rename { old, new } => {
            session.rename(old, new)?;
            println!("Renamed {old} to {new}");
        }
        FilesCommand::Delete { name, yes } => {
            if session.files().get(name).is_none() {
                return Err(anyhow::anyhow!("No file named '{name}'"));
            }
            if !yes && !confirm(&format!("Delete {name}?"))? {
                println!("Kept {name}");
                return Ok(());
            }
            session.delete(name)?;
            println!("Deleted {name}");
        }
        FilesCommand::Tutorial => {
            let name = session.add_tutorial();
            println!("Added {name}");
        }
        FilesCommand::Import { path, name } => {
            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                anyhow::anyhow!("Failed to read {path}: {e}", path = path.display())
            })?;
            let name = name.clone().or_else(|| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            });
            let name = session.create(name.as_deref(), Some(&content))?;
            println!("Imported {path} as {name}", path = path.display());
        }
        FilesCommand::Export { name, output, html } => {
            let file = session
                .files()
                .get(name)
                .ok_or_else(|| anyhow::anyhow!("No file named '{name}'"))?;
            let (text, extension) = if *html {
                (session.render_file(name)?, "html")
            } else {
                (file.content.clone(), "md")
            };
            let output = output
                .clone()
                .unwrap_or_else(|| format!("{name}.{extension}").into());
            tokio::fs::write(&output, text).await?;
            println!("Exported {name} to {output}", output = output.display());
            return Ok(());
        }
    }

    session.persist()?;
    Ok(())
}

fn show(session: &Session, name: Option<&str>, raw: bool) -> Result<(), anyhow::Error> {
    let file = match name {
        Some(name) => session
            .files()
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("No file named '{name}'"))?,
        None => session
            .current()
            .ok_or_else(|| anyhow::anyhow!("No file is open"))?,
    };

    if raw {
        println!("{}", file.content);
    } else {
        println!("{}", session.render_file(&file.name)?);
    }
    Ok(())
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` means no.
fn confirm(question: &str) -> Result<bool, anyhow::Error> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
