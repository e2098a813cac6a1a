use crate::{ProcessArgs, config::Settings, process::Processor, storage::FsStorage};

pub fn run(args: &ProcessArgs) -> Result<(), anyhow::Error> {
    let settings = Settings::load_from_arg(args.config_file.as_deref())?;

    let result = Processor::new(&settings.process, &settings.markdown, &FsStorage).run()?;

    let display_output = result
        .output_dir
        .canonicalize()
        .unwrap_or(result.output_dir.clone());
    println!(
        "Built {} card(s) and {} image(s) into {}",
        result.cards,
        result.images,
        display_output.display()
    );
    println!("Done");

    Ok(())
}
