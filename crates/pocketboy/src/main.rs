use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let options = pocketboy::parse_args(std::env::args().skip(1))?;
    pocketboy::run(&options)
}
