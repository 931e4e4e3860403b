//! Host-side helper: `cargo run` builds the WASM package with wasm-pack and
//! serves `static/` on a local HTTP server.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::path::PathBuf;
    use std::process::{Command, ExitCode, Stdio};

    use clap::Parser;

    #[derive(Debug, Parser)]
    #[command(about = "Build the backdrop scenes and serve the site locally")]
    pub struct Args {
        /// Port for the static file server.
        #[arg(long, default_value_t = 8000)]
        port: u16,

        /// Serve whatever is already in the output directory.
        #[arg(long)]
        skip_build: bool,

        /// wasm-pack output directory.
        #[arg(long, default_value = "static/pkg")]
        out_dir: PathBuf,

        /// Directory served over HTTP.
        #[arg(long, default_value = "static")]
        site: PathBuf,
    }

    fn build(args: &Args) -> bool {
        log::info!("building wasm package into {}", args.out_dir.display());
        match Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir"])
            .arg(&args.out_dir)
            .status()
        {
            Ok(st) if st.success() => true,
            Ok(st) => {
                log::error!("wasm-pack finished with {st}");
                false
            }
            Err(e) => {
                log::error!("wasm-pack not runnable ({e}); install it from https://rustwasm.github.io/wasm-pack/");
                false
            }
        }
    }

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let args = Args::parse();

        if !args.skip_build && !build(&args) {
            return ExitCode::FAILURE;
        }

        log::info!("serving {} at http://127.0.0.1:{}", args.site.display(), args.port);
        let server = Command::new("python3")
            .args(["-m", "http.server"])
            .arg(args.port.to_string())
            .arg("--directory")
            .arg(&args.site)
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn();

        match server.and_then(|mut child| child.wait()) {
            Ok(st) if st.success() => ExitCode::SUCCESS,
            Ok(st) => {
                log::error!("http server exited with {st}");
                ExitCode::FAILURE
            }
            Err(e) => {
                log::error!("failed to start http server: {e}");
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    host::run()
}

// Only meaningful on non-wasm targets.
#[cfg(target_arch = "wasm32")]
fn main() {}
