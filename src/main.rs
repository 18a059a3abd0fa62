//! Host-side helper: `cargo run` checks the dataset, builds the WASM package
//! into `static/pkg`, serves `static/` locally and (if available) exposes it
//! via ngrok.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    host::run();
}

// wasm-pack also compiles this binary for wasm32; there is nothing to do there.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::path::Path;
    use std::process::{Command, Stdio};
    use std::{fs, process, thread, time::Duration};

    use glossviz_wasm::gloss::{GlossIndex, IndexOptions};

    const STATIC_DIR: &str = "static";
    const DATASET: &str = "static/WLASL_v0.3.json";
    const PORT: &str = "8000";

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        check_dataset(Path::new(DATASET));

        // Build wasm bundle
        log::info!("building WASM pkg …");
        match Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status()
        {
            Ok(st) if st.success() => {}
            Ok(_) => {
                log::error!(
                    "wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/)."
                );
                process::exit(1);
            }
            Err(_) => {
                log::warn!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
            }
        }

        log::info!("launching local server at http://127.0.0.1:{PORT} …");
        let _server = match Command::new("python3")
            .args(["-m", "http.server", PORT, "--directory", STATIC_DIR])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(err) => {
                log::error!("failed to start http server: {err}");
                process::exit(1);
            }
        };

        match Command::new("ngrok")
            .args(["http", PORT])
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
        {
            Ok(_) => log::info!("ngrok tunnel starting …"),
            Err(_) => log::warn!("ngrok not found. Install it to expose the site over the internet."),
        }

        // Keep process alive
        loop {
            thread::sleep(Duration::from_secs(60));
        }
    }

    /// Report what the page will see. A missing or broken dataset is not
    /// fatal; the page then runs with an empty index.
    fn check_dataset(path: &Path) {
        let body = match fs::read_to_string(path) {
            Ok(body) => body,
            Err(err) => {
                log::warn!("{}: {err}; gloss lookups will miss", path.display());
                return;
            }
        };
        match GlossIndex::from_json(&body, &IndexOptions::default()) {
            Ok(index) => log::info!(
                "{}: {} glosses, {} with playable clips",
                path.display(),
                index.vocabulary().len(),
                index.len()
            ),
            Err(err) => log::warn!("{}: {err}", path.display()),
        }
    }
}
