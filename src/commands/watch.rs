use std::path::Path;

use mdpad::config::MdpadConfig;
use mdpad::render::{FileWatcher, PageContext, PreviewRenderer, WatchEvent};
use mdpad::util::{absolute_path, html_output_path};

use crate::WatchArgs;

pub async fn run(args: &WatchArgs) -> Result<(), anyhow::Error> {
    let (config, _) = MdpadConfig::load_from_arg(args.config_file.as_deref())?;

    // Canonicalize so the path matches what the watcher reports.
    let input = absolute_path(&args.input)?.canonicalize().map_err(|e| {
        anyhow::anyhow!("Failed to read {input}: {e}", input = args.input.display())
    })?;
    let output = match &args.output {
        Some(output) => absolute_path(output)?,
        None => html_output_path(&input),
    };
    let preview = if args.standalone {
        Some(PreviewRenderer::new(&config.preview.title)?)
    } else {
        None
    };

    render_file(&input, &output, preview.as_ref())?;
    println!(
        "Rendered {input} to {output}",
        input = input.display(),
        output = output.display()
    );

    let watcher = FileWatcher::new(&config.watch, std::slice::from_ref(&input))?;
    println!("Watching for changes, press Ctrl+C to stop");

    tokio::task::spawn_blocking(move || {
        while let Some(event) = watcher.recv() {
            match event {
                WatchEvent::Changed(_) => match render_file(&input, &output, preview.as_ref()) {
                    Ok(()) => println!("Re-rendered {output}", output = output.display()),
                    Err(e) => eprintln!("Render error: {e}"),
                },
                WatchEvent::Error(e) => {
                    eprintln!("Watch error: {e}");
                }
            }
        }
    })
    .await?;

    Ok(())
}

fn render_file(
    input: &Path,
    output: &Path,
    preview: Option<&PreviewRenderer>,
) -> Result<(), anyhow::Error> {
    let markdown = std::fs::read_to_string(input)?;
    let mut html = mdpad::render(&markdown);

    if let Some(preview) = preview {
        html = preview.render_page(&PageContext {
            file: input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned()),
            content: html,
            ..Default::default()
        })?;
    }

    std::fs::write(output, html)?;
    tracing::info!(output = %output.display(), "rendered");
    Ok(())
}
