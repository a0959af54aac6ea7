//! Resource manager contract, default implementation, and the per-page/
//! XObject resource binder.
//!
//! `ResourceManager` mirrors `spec.md` §6's contract 1:1
//! (`get_font`/`get_cmap`/`get_procset`). `DefaultResourceManager` adds the
//! atomic insert-or-get font cache from §5, grounded on the teacher's
//! `rustc-hash`-backed cache in `core::font.rs` plus a `Mutex` since this
//! crate's resource manager is shared across concurrently-running page
//! interpreters (the teacher's own font cache is single-threaded, so the
//! mutex is this crate's addition, noted in `DESIGN.md`). `ResourceBinder`
//! builds `fontmap`/`xobjmap`/`csmap` from a resource dictionary, logging
//! each binding the way `pdfminer.pdfinterp.PDFPageInterpreter.init_resources`
//! does with `log.debug("Resource: %r: %r", k, v)`.

use crate::cmap::CMap;
use crate::color::ColorSpace;
use crate::error::{InterpError, InterpResult};
use crate::font::{Font, FontRef, FontType, Glyph};
use crate::object::Object;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};

pub type ObjId = u64;

/// A minimal, width-table-less fallback font used in lenient mode when a
/// font dictionary can't be resolved, or as the Type1 default for unknown
/// subtypes per `spec.md` §6.
#[derive(Debug)]
pub struct SimpleFont {
    font_type: FontType,
    is_cid: bool,
    default_width: f64,
}

impl SimpleFont {
    pub fn new(font_type: FontType) -> Self {
        SimpleFont {
            is_cid: font_type.is_cid_font(),
            font_type,
            default_width: 500.0,
        }
    }

    pub fn default_type1() -> Self {
        SimpleFont::new(FontType::Type1)
    }
}

impl Font for SimpleFont {
    fn font_type(&self) -> FontType {
        self.font_type
    }

    fn decode_string(&self, bytes: &[u8]) -> Vec<Glyph> {
        if self.is_cid {
            bytes
                .chunks(2)
                .map(|chunk| {
                    let code = if chunk.len() == 2 {
                        ((chunk[0] as u32) << 8) | chunk[1] as u32
                    } else {
                        chunk[0] as u32
                    };
                    Glyph {
                        code,
                        width: self.default_width,
                        is_space: false,
                    }
                })
                .collect()
        } else {
            bytes
                .iter()
                .map(|&b| Glyph {
                    code: b as u32,
                    width: self.default_width,
                    is_space: b == 0x20,
                })
                .collect()
        }
    }
}

pub trait ResourceManager: Send + Sync {
    fn get_font(
        &self,
        objid: Option<ObjId>,
        spec_dict: &FxHashMap<String, Object>,
        strict: bool,
    ) -> InterpResult<FontRef>;

    fn get_cmap(&self, name: &str, strict: bool) -> InterpResult<CMap>;

    /// No-op per `spec.md` §6; accepted for forward compatibility.
    fn get_procset(&self, _names: &[String]) {}
}

#[derive(Debug, Clone, Copy)]
pub struct ResourceManagerConfig {
    pub caching: bool,
}

impl Default for ResourceManagerConfig {
    fn default() -> Self {
        ResourceManagerConfig { caching: true }
    }
}

pub struct DefaultResourceManager {
    config: ResourceManagerConfig,
    font_cache: Mutex<FxHashMap<ObjId, FontRef>>,
}

impl DefaultResourceManager {
    pub fn new(config: ResourceManagerConfig) -> Self {
        DefaultResourceManager {
            config,
            font_cache: Mutex::new(FxHashMap::default()),
        }
    }

    fn build_font(spec_dict: &FxHashMap<String, Object>, strict: bool) -> InterpResult<FontRef> {
        let subtype = spec_dict
            .get("Subtype")
            .and_then(|o| o.as_name())
            .unwrap_or("Type1");

        if subtype == "Type0" {
            let descendant = spec_dict
                .get("DescendantFonts")
                .and_then(|o| o.as_array())
                .and_then(|a| a.first())
                .and_then(|o| o.as_dictionary());
            return match descendant {
                Some(d) => Self::build_font(d, strict),
                None if strict => Err(InterpError::Font(
                    "Type0 font missing DescendantFonts[0]".into(),
                )),
                None => Ok(Arc::new(SimpleFont::default_type1())),
            };
        }

        let font_type = FontType::from_subtype(subtype);
        if font_type == FontType::Unknown {
            if strict {
                return Err(InterpError::Font(format!("unknown font subtype {subtype:?}")));
            }
            return Ok(Arc::new(SimpleFont::default_type1()));
        }
        Ok(Arc::new(SimpleFont::new(font_type)))
    }
}

impl ResourceManager for DefaultResourceManager {
    fn get_font(
        &self,
        objid: Option<ObjId>,
        spec_dict: &FxHashMap<String, Object>,
        strict: bool,
    ) -> InterpResult<FontRef> {
        if !self.config.caching {
            return Self::build_font(spec_dict, strict);
        }
        let Some(id) = objid else {
            return Self::build_font(spec_dict, strict);
        };

        {
            let cache = self.font_cache.lock().unwrap();
            if let Some(font) = cache.get(&id) {
                return Ok(font.clone());
            }
        }
        tracing::debug!(objid = id, "get_font: create new font");
        let font = Self::build_font(spec_dict, strict)?;
        let mut cache = self.font_cache.lock().unwrap();
        let font = cache.entry(id).or_insert(font).clone();
        Ok(font)
    }

    fn get_cmap(&self, name: &str, strict: bool) -> InterpResult<CMap> {
        if name == "Identity-H" || name == "Identity-V" || name.is_empty() {
            return Ok(CMap::empty());
        }
        if strict {
            Err(InterpError::CMapNotFound(name.to_string()))
        } else {
            Ok(CMap::empty())
        }
    }
}

/// The per-page/Form-XObject bindings the dispatcher consults: font, color
/// space, and XObject name tables, seeded from a resource dictionary.
#[derive(Debug, Clone, Default)]
pub struct ResourceBinder {
    pub fontmap: FxHashMap<String, FontRef>,
    pub xobjmap: FxHashMap<String, Object>,
    pub csmap: FxHashMap<String, ColorSpace>,
}

impl ResourceBinder {
    /// Seeds `csmap` with the predefined table (`spec.md` §4.5), then
    /// overlays the resource dictionary's own entries.
    pub fn with_predefined_colorspaces() -> Self {
        let mut csmap = FxHashMap::default();
        for name in [
            "DeviceGray",
            "DeviceRGB",
            "DeviceCMYK",
            "CalGray",
            "CalRGB",
            "CalCMYK",
            "Lab",
            "Pattern",
        ] {
            if let Some(cs) = ColorSpace::from_name(name) {
                csmap.insert(name.to_string(), cs);
            }
        }
        // The four parameterized families get a placeholder entry with a
        // default component count, overridden once a resource dictionary's
        // own `[/Family ...]` array is bound.
        csmap.insert("ICCBased".to_string(), ColorSpace::ICCBased(3));
        csmap.insert(
            "Indexed".to_string(),
            ColorSpace::Indexed(Box::new(ColorSpace::DeviceGray)),
        );
        csmap.insert("Separation".to_string(), ColorSpace::Separation);
        csmap.insert("DeviceN".to_string(), ColorSpace::DeviceN(1));
        ResourceBinder {
            fontmap: FxHashMap::default(),
            xobjmap: FxHashMap::default(),
            csmap,
        }
    }

    /// Binds `/Font`, `/ColorSpace`, and `/XObject` subdictionaries of a
    /// resource dictionary, per `pdfminer.pdfinterp.PDFPageInterpreter
    /// .init_resources`.
    pub fn bind(
        &mut self,
        resources: &FxHashMap<String, Object>,
        rm: &dyn ResourceManager,
        strict: bool,
    ) -> InterpResult<()> {
        if let Some(fonts) = resources.get("Font").and_then(|o| o.as_dictionary()) {
            for (name, spec) in fonts {
                let Some(dict) = spec.as_dictionary() else {
                    continue;
                };
                let font = rm.get_font(None, dict, strict)?;
                tracing::debug!(resource = "Font", name = %name, "bound");
                self.fontmap.insert(name.clone(), font);
            }
        }
        if let Some(colorspaces) = resources.get("ColorSpace").and_then(|o| o.as_dictionary()) {
            for (name, spec) in colorspaces {
                let cs = match spec {
                    Object::Name(n) => ColorSpace::from_name(n),
                    Object::Array(arr) => ColorSpace::from_array(arr),
                    _ => None,
                };
                if let Some(cs) = cs {
                    tracing::debug!(resource = "ColorSpace", name = %name, "bound");
                    self.csmap.insert(name.clone(), cs);
                }
            }
        }
        if let Some(xobjects) = resources.get("XObject").and_then(|o| o.as_dictionary()) {
            for (name, spec) in xobjects {
                tracing::debug!(resource = "XObject", name = %name, "bound");
                self.xobjmap.insert(name.clone(), spec.clone());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(pairs: &[(&str, Object)]) -> FxHashMap<String, Object> {
        pairs.iter().cloned().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn get_font_caches_by_objid() {
        let rm = DefaultResourceManager::new(ResourceManagerConfig::default());
        let spec = dict(&[("Subtype", Object::Name("Type1".into()))]);
        let f1 = rm.get_font(Some(1), &spec, true).unwrap();
        let f2 = rm.get_font(Some(1), &spec, true).unwrap();
        assert!(Arc::ptr_eq(&f1, &f2));
    }

    #[test]
    fn get_font_unknown_subtype_lenient_falls_back() {
        let rm = DefaultResourceManager::new(ResourceManagerConfig::default());
        let spec = dict(&[("Subtype", Object::Name("Bogus".into()))]);
        let font = rm.get_font(None, &spec, false).unwrap();
        assert_eq!(font.font_type(), FontType::Type1);
    }

    #[test]
    fn get_font_unknown_subtype_strict_errors() {
        let rm = DefaultResourceManager::new(ResourceManagerConfig::default());
        let spec = dict(&[("Subtype", Object::Name("Bogus".into()))]);
        assert!(rm.get_font(None, &spec, true).is_err());
    }

    #[test]
    fn get_cmap_missing_strict_errors() {
        let rm = DefaultResourceManager::new(ResourceManagerConfig::default());
        assert!(rm.get_cmap("Some-Unknown-CMap", true).is_err());
    }

    #[test]
    fn predefined_colorspaces_seeded() {
        let binder = ResourceBinder::with_predefined_colorspaces();
        assert_eq!(binder.csmap.get("DeviceRGB"), Some(&ColorSpace::DeviceRGB));
    }

    #[test]
    fn parameterized_colorspace_families_get_placeholder_entries() {
        let binder = ResourceBinder::with_predefined_colorspaces();
        assert_eq!(binder.csmap.get("ICCBased"), Some(&ColorSpace::ICCBased(3)));
        assert_eq!(binder.csmap.get("Separation"), Some(&ColorSpace::Separation));
        assert_eq!(binder.csmap.get("DeviceN"), Some(&ColorSpace::DeviceN(1)));
        assert_eq!(
            binder.csmap.get("Indexed"),
            Some(&ColorSpace::Indexed(Box::new(ColorSpace::DeviceGray)))
        );
    }
}
