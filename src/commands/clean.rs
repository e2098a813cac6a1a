use crate::{CleanArgs, config::Settings, storage::FsStorage, storage::Storage};

pub fn run(args: &CleanArgs) -> Result<(), anyhow::Error> {
    let settings = Settings::load_from_arg(args.config_file.as_deref())?;

    // Delete the processor output folder
    let output_dir = &settings.process.output_dir;
    if output_dir.exists() {
        if args.dry_run {
            println!("Would delete {}", output_dir.display());
        } else {
            FsStorage.remove_dir_all(output_dir)?;
            println!("Deleted {}", output_dir.display());
        }
    }

    Ok(())
}
