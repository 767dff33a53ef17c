//! Built-in Builders
//!
//! | Type name    | Builder                                   |
//! |--------------|-------------------------------------------|
//! | `Concat`     | header + inputs + footer, text or bytes   |
//! | `Multipart`  | `Concat` with re-splittable framing       |
//! | `TreeConcat` | statement-tree concatenation with wrappers |
//! | `Copy`       | byte copy of a single input               |

mod concat;
mod copy;
mod multipart;
mod tree_concat;

use std::rc::Rc;

pub use concat::{Concat, ConcatConfig, Framing, Plain};
pub use copy::SingleCopy;
pub use multipart::{multipart, MultipartConfig, MultipartFraming, DEFAULT_BOUNDARY};
pub use tree_concat::{TreeConcat, TreeConcatConfig};

use crate::application::{parse_config, TypeRegistry};
use crate::domain::ports::Builder;

/// Registry holding every built-in builder type
pub fn builtin_registry() -> TypeRegistry<dyn Builder> {
    let mut registry: TypeRegistry<dyn Builder> = TypeRegistry::new("builder");
    registry.register("Concat", |config| {
        Ok(Rc::new(Concat::from_config(config)?) as Rc<dyn Builder>)
    });
    registry.register("Multipart", |config| {
        Ok(Rc::new(multipart::from_config(config)?) as Rc<dyn Builder>)
    });
    registry.register("TreeConcat", |config| {
        Ok(Rc::new(TreeConcat::from_config(config)?) as Rc<dyn Builder>)
    });
    registry.register("Copy", |config| {
        let _: NoConfig = parse_config("Copy", config)?;
        Ok(Rc::new(SingleCopy) as Rc<dyn Builder>)
    });
    registry
}

/// Config of types that accept no keys
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct NoConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Descriptor;

    #[test]
    fn every_builtin_is_registered() {
        let registry = builtin_registry();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["Concat", "Copy", "Multipart", "TreeConcat"]);
    }

    #[test]
    fn builder_names_match_type_names() {
        let registry = builtin_registry();
        for name in ["Concat", "Copy", "Multipart", "TreeConcat"] {
            let builder = registry.create(&Descriptor::named(name)).unwrap();
            assert_eq!(builder.name(), name);
        }
    }

    #[test]
    fn copy_rejects_config_keys() {
        let registry = builtin_registry();
        let config: toml::Value = toml::from_str("header = \"x\"").unwrap();
        assert!(registry.create(&Descriptor::typed("Copy", config)).is_err());
    }
}
