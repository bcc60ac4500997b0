use std::sync::Arc;

use log::warn;
use resvg::usvg::fontdb;

/// DejaVu Sans Mono, shipped with the crate so labels do not depend on the fonts installed on the host.
pub const FONT_BYTES: &[u8] = include_bytes!("../../fonts/DejaVuSansMono.ttf");

const FALLBACK_FAMILY: &str = "monospace";

/// Font database containing only the embedded font, together with the family name it registered.
pub fn embedded_fonts() -> (Arc<fontdb::Database>, String) {
    let mut db = fontdb::Database::new();
    db.load_font_data(FONT_BYTES.to_vec());

    let family = db
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone());

    let family = match family {
        Some(name) => name,
        None => {
            warn!("[RENDER] embedded font could not be loaded, labels will be missing");
            FALLBACK_FAMILY.to_string()
        }
    };
    db.set_monospace_family(family.clone());

    (Arc::new(db), family)
}
