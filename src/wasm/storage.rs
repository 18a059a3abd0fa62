use web_sys::Storage;

use crate::viz::Config;

/// `localStorage` key of the persisted visualizer config.
pub const CONFIG_KEY: &str = "glossviz.config";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Merge a previously saved config, if any. Bad entries are skipped.
pub fn restore(config: &mut Config) {
    let Some(json) = local_storage().and_then(|s| s.get_item(CONFIG_KEY).ok().flatten()) else {
        return;
    };
    if let Err(err) = config.merge_json(&json) {
        log::warn!("discarding saved config: {err}");
    }
}

pub fn save(config: &Config) {
    let Some(storage) = local_storage() else {
        return;
    };
    match config.to_json() {
        Ok(json) => {
            if storage.set_item(CONFIG_KEY, &json).is_err() {
                log::warn!("config not saved: storage refused the write");
            }
        }
        Err(err) => log::warn!("config not saved: {err}"),
    }
}
