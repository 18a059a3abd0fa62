use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FontFace, HtmlImageElement};

use super::canvas::CanvasSurface;
use crate::viz::{AssetDecl, AssetHandle, AssetKind, Assets};
use crate::VizError;

/// Load a font and register it under its asset id as the family name.
async fn load_font(decl: &AssetDecl) -> Result<String, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document")?;
    let face = FontFace::new_with_str(decl.id, &format!("url({})", decl.url))?;
    JsFuture::from(face.load()?).await?;
    document.fonts().add(&face)?;
    Ok(decl.id.to_string())
}

async fn load_image(decl: &AssetDecl) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;
    image.set_src(decl.url);
    JsFuture::from(image.decode()).await?;
    Ok(image)
}

/// Resolve every declaration. Failures become [`AssetHandle::Missing`] so
/// presets fall back instead of waiting.
pub async fn load_all(
    decls: &[AssetDecl],
    surface: &std::rc::Rc<std::cell::RefCell<CanvasSurface>>,
) -> Assets {
    let mut assets = Assets::new();
    for decl in decls {
        let handle = match decl.kind {
            AssetKind::Font => load_font(decl).await.map(AssetHandle::Font),
            AssetKind::Image => load_image(decl)
                .await
                .map(|image| AssetHandle::Image(surface.borrow_mut().register_image(image))),
        };
        let handle = handle.unwrap_or_else(|err| {
            let reason = err
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
                .unwrap_or_else(|| format!("{err:?}"));
            log::warn!(
                "{}",
                VizError::Asset {
                    id: decl.id.to_string(),
                    reason,
                }
            );
            AssetHandle::Missing(decl.kind)
        });
        assets.insert(decl.id, handle);
    }
    assets
}
