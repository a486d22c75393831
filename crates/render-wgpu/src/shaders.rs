/// WGSL shader for the colored tetrahedron.
///
/// Uniform fields are declared in the same order as
/// `tetraview_render::UNIFORM_NAMES`.
pub const MESH_SHADER: &str = r#"
struct Uniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.projection * uniforms.view * uniforms.model
        * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tetraview_render::UNIFORM_NAMES;

    #[test]
    fn uniform_fields_match_slot_order() {
        let positions: Vec<usize> = UNIFORM_NAMES
            .iter()
            .map(|name| {
                MESH_SHADER
                    .find(&format!("    {name}: mat4x4<f32>,"))
                    .unwrap_or_else(|| panic!("missing uniform {name}"))
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn entry_points_present() {
        assert!(MESH_SHADER.contains("fn vs_main("));
        assert!(MESH_SHADER.contains("fn fs_main("));
    }
}
