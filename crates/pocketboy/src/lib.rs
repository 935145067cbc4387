use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use typed_builder::TypedBuilder;

use pocketboy_gb::{GameBoy, CLOCK_HZ, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Frames run when neither `-f` nor `POCKETBOY_FRAMES` says otherwise.
pub const DEFAULT_FRAMES: u32 = 60;
const FRAMES_ENV: &str = "POCKETBOY_FRAMES";
const USAGE: &str = "usage: pocketboy <rom.gb> [-o save.sav] [-f frames] [-d frame.rgb]";

#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RunOptions {
    #[builder(setter(into))]
    pub rom_path: PathBuf,
    /// Battery save file. Defaults to the ROM path with a `.sav` extension.
    #[builder(default)]
    pub save_path: Option<PathBuf>,
    #[builder(default = DEFAULT_FRAMES)]
    pub frames: u32,
    /// Where to write the last frame as raw RGB24.
    #[builder(default)]
    pub dump_path: Option<PathBuf>,
}

impl RunOptions {
    pub fn save_path(&self) -> PathBuf {
        self.save_path
            .clone()
            .unwrap_or_else(|| self.rom_path.with_extension("sav"))
    }
}

/// Parse command-line arguments (without the program name).
///
/// `POCKETBOY_FRAMES` replaces the default frame count; `-f` still wins.
pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<RunOptions> {
    let default_frames = match std::env::var(FRAMES_ENV) {
        Ok(value) => parse_frames(&value).with_context(|| format!("invalid {FRAMES_ENV}"))?,
        Err(_) => DEFAULT_FRAMES,
    };
    parse_args_with(args, default_frames)
}

fn parse_args_with(
    args: impl IntoIterator<Item = String>,
    default_frames: u32,
) -> Result<RunOptions> {
    let mut args = args.into_iter();
    let mut rom_path = None;
    let mut save_path = None;
    let mut frames = default_frames;
    let mut dump_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" => save_path = Some(PathBuf::from(flag_value(&mut args, "-o")?)),
            "-f" => frames = parse_frames(&flag_value(&mut args, "-f")?)?,
            "-d" => dump_path = Some(PathBuf::from(flag_value(&mut args, "-d")?)),
            flag if flag.starts_with('-') => bail!("unknown option '{flag}'\n{USAGE}"),
            _ if rom_path.is_some() => bail!("unexpected argument '{arg}'\n{USAGE}"),
            _ => rom_path = Some(PathBuf::from(arg)),
        }
    }

    let Some(rom_path) = rom_path else {
        bail!("no ROM path given\n{USAGE}");
    };

    Ok(RunOptions::builder()
        .rom_path(rom_path)
        .save_path(save_path)
        .frames(frames)
        .dump_path(dump_path)
        .build())
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} needs a value\n{USAGE}"))
}

fn parse_frames(value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .with_context(|| format!("'{value}' is not a frame count"))
}

fn read_save(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}

/// Load the ROM, run the requested frames, then dump and save.
pub fn run(options: &RunOptions) -> Result<()> {
    let rom = fs::read(&options.rom_path)
        .with_context(|| format!("failed to read ROM {}", options.rom_path.display()))?;
    let save_path = options.save_path();
    let saved_ram = read_save(&save_path)?;
    if saved_ram.is_some() {
        log::info!("Restoring cartridge RAM from {}", save_path.display());
    }

    let mut gb = GameBoy::new();
    let header = gb
        .load_rom(&rom, saved_ram.as_deref())
        .with_context(|| format!("failed to load {}", options.rom_path.display()))?;
    log::info!(
        "Loaded '{}': {:?}, {} KiB ROM, {} KiB RAM{}",
        header.title,
        header.mapper,
        header.rom_size / 1024,
        header.ram_size / 1024,
        if header.cgb { ", CGB" } else { "" },
    );

    let target = save_path.clone();
    gb.set_save_callback(Box::new(move |ram: &[u8]| match fs::write(&target, ram) {
        Ok(()) => log::info!("Wrote {} bytes to {}", ram.len(), target.display()),
        Err(err) => log::error!("Failed to write {}: {err}", target.display()),
    }));

    log::info!("Running {} frames", options.frames);
    let mut cycles = 0u64;
    for _ in 0..options.frames {
        cycles += gb.run_frame() as u64;
    }

    if let Some(dump_path) = &options.dump_path {
        let mut frame = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * 3];
        gb.frame_rgb24(&mut frame);
        fs::write(dump_path, &frame)
            .with_context(|| format!("failed to write {}", dump_path.display()))?;
        log::info!("Dumped last frame to {}", dump_path.display());
    }

    let serial = gb.serial_output();
    if !serial.is_empty() {
        log::info!("Serial output: {}", String::from_utf8_lossy(serial));
    }

    gb.save();
    log::info!(
        "Finished after {cycles} cycles ({:.2}s emulated)",
        cycles as f64 / CLOCK_HZ as f64
    );
    Ok(())
}
