use crate::{ExtractArgs, config::Settings, extract::Extractor, storage::FsStorage};

pub fn run(args: &ExtractArgs) -> Result<(), anyhow::Error> {
    let settings = Settings::load_from_arg(args.config_file.as_deref())?;

    println!("Reading cards from {}", settings.extract.template.display());
    let result = Extractor::new(&settings.extract, &FsStorage).run()?;

    println!(
        "Wrote {} card(s) to {}",
        result.written.len(),
        settings.extract.content_dir.display()
    );

    Ok(())
}
