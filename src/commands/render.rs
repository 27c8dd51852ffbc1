use tokio::io::AsyncReadExt;

use mdpad::config::MdpadConfig;
use mdpad::render::{PageContext, PreviewRenderer};

use crate::RenderArgs;

pub async fn run(args: &RenderArgs) -> Result<(), anyhow::Error> {
    let markdown = match &args.input {
        Some(input) => tokio::fs::read_to_string(input).await.map_err(|e| {
            anyhow::anyhow!("Failed to read {input}: {e}", input = input.display())
        })?,
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            text
        }
    };

    let mut html = mdpad::render(&markdown);

    if args.standalone {
        let (config, _) = MdpadConfig::load_from_arg(args.config_file.as_deref())?;
        let preview = PreviewRenderer::new(&config.preview.title)?;
        html = preview.render_page(&PageContext {
            file: args
                .input
                .as_ref()
                .and_then(|p| p.file_stem())
                .map(|stem| stem.to_string_lossy().into_owned()),
            content: html,
            ..Default::default()
        })?;
    }

    match &args.output {
        Some(output) => {
            tokio::fs::write(output, &html).await?;
            println!("Wrote {output}", output = output.display());
        }
        None => print!("{html}"),
    }

    Ok(())
}
