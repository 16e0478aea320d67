use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = loanlens_api::Args::parse();

	loanlens_api::run(args).await
}
