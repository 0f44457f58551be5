//! Quake 3 sky shader descriptor.
//!
//! Engines pick up a skybox through a small shader script that points at the
//! face textures by naming convention. The template is the stock Quake 3 sky
//! shader, tab indentation included.

use log::debug;
use std::io;
use std::path::{Path, PathBuf};

/// Shader script for a skybox named `name`.
///
/// The engine resolves face textures as `textures/<name>/<name>_<suffix>.jpg`
/// from the trailing `skyparms` line.
pub fn shader_text(name: &str) -> String {
    format!(
        "textures/{name}/{name} {{\n\
         \tqer_editorimage textures/{name}/{name}_ft.jpg\n\
         \tsurfaceparm noimpact\n\
         \tsurfaceparm nolightmap\n\
         \tq3map_globaltexture\n\
         \tq3map_lightsubdivide 256\n\
         \tq3map_surfacelight 100\n\
         \tsurfaceparm sky\n\
         \tq3map_sun 1 1 1 100 260 35\n\
         \tskyparms textures/{name}/{name} - -\n\
         }}",
        name = name
    )
}

/// Write `<dir>/<name>.shader` and return its path.
pub fn write_shader(dir: &Path, name: &str) -> io::Result<PathBuf> {
    let path = dir.join(format!("{}.shader", name));
    debug!("Writing shader descriptor to {}", path.display());
    std::fs::write(&path, shader_text(name))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_text_exact() {
        let text = shader_text("alpine");
        let expected = "textures/alpine/alpine {\n\
                        \tqer_editorimage textures/alpine/alpine_ft.jpg\n\
                        \tsurfaceparm noimpact\n\
                        \tsurfaceparm nolightmap\n\
                        \tq3map_globaltexture\n\
                        \tq3map_lightsubdivide 256\n\
                        \tq3map_surfacelight 100\n\
                        \tsurfaceparm sky\n\
                        \tq3map_sun 1 1 1 100 260 35\n\
                        \tskyparms textures/alpine/alpine - -\n\
                        }";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_shader_text_substitutes_name() {
        let text = shader_text("night_city");
        assert!(text.starts_with("textures/night_city/night_city {\n"));
        assert!(text.contains("night_city_ft.jpg"));
        assert!(text.contains("skyparms textures/night_city/night_city - -"));
        assert!(text.ends_with("\n}"));
    }

    #[test]
    fn test_shader_body_is_tab_indented() {
        let text = shader_text("sky");
        for line in text.lines().skip(1) {
            if line != "}" {
                assert!(line.starts_with('\t'), "line not tab-indented: {:?}", line);
            }
        }
    }
}
