//! # Color-Cycle Shader Patch
//!
//! Rewrites the lit shader's base-color statement into a cosine palette
//! driven by the surface normal and the shared `playhead` phase. The patch
//! is a pure source-to-source substitution applied before the shader is
//! handed to the pipeline manager; the `playhead` uniform is already
//! declared in the material block, so the bind group layout is unchanged.

use thiserror::Error;

/// The statement in `pbr.wgsl` that the patch replaces
pub const ANCHOR: &str = "let surface_color = material.base_color.rgb;";

/// Cosine palette: color = A + B·cos(2π·(C·diff + D + playhead)), where
/// diff measures the normal's alignment with (1, 1, 1).
const COLOR_CYCLE_BLOCK: &str = "\
let color_a = vec3<f32>(0.5, 0.5, 0.5);
    let color_b = vec3<f32>(0.5, 0.5, 0.5);
    let color_c = vec3<f32>(2.0, 1.0, 0.0);
    let color_d = vec3<f32>(0.5, 0.2, 0.25);
    let diff = dot(vec3<f32>(1.0, 1.0, 1.0), normal);
    let surface_color = color_a
        + color_b * cos(6.2831853 * (color_c * diff + color_d + vec3<f32>(material.playhead)));";

#[derive(Debug, Error)]
pub enum ShaderPatchError {
    #[error("color-cycle anchor `{anchor}` not found in shader source")]
    AnchorMissing { anchor: &'static str },
}

/// Installs the color-cycle palette into a lit shader source
///
/// Errors if the shader does not carry the anchor statement, which would
/// leave the demo without its animated color.
pub fn inject_color_cycle(source: &str) -> Result<String, ShaderPatchError> {
    if !source.contains(ANCHOR) {
        return Err(ShaderPatchError::AnchorMissing { anchor: ANCHOR });
    }
    Ok(source.replacen(ANCHOR, COLOR_CYCLE_BLOCK, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::rendering::LIT_SHADER;

    #[test]
    fn test_lit_shader_carries_the_anchor() {
        assert!(LIT_SHADER.contains(ANCHOR));
    }

    #[test]
    fn test_patch_replaces_the_anchor() {
        let patched = inject_color_cycle(LIT_SHADER).unwrap();
        assert!(!patched.contains(ANCHOR));
        assert!(patched.contains("material.playhead"));
        assert!(patched.contains("cos(6.2831853"));
        // Still defines the binding the rest of the shader reads
        assert!(patched.contains("let surface_color"));
    }

    #[test]
    fn test_missing_anchor_is_an_error() {
        let result = inject_color_cycle("@fragment fn fs_main() {}");
        assert!(matches!(
            result,
            Err(ShaderPatchError::AnchorMissing { .. })
        ));
    }
}
