use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = pdfhub::cli::parse();
    app::run(args)
}
