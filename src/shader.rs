//! WGSL source for the instanced quad pipeline.

/// Render shader: expands each instance into a rotated quad in the vertex
/// stage and maps logical pixels to clip space (y grows downward).
///
/// Instance layout must match [`Instance`](crate::particle::Instance) and the
/// `Globals` struct in `render.rs`.
pub const SHADER_SOURCE: &str = r#"
struct Globals {
    surface_size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) pos_size: vec4<f32>,
    @location(1) color: vec4<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>( 0.5, -0.5),
        vec2<f32>(-0.5,  0.5),
        vec2<f32>(-0.5,  0.5),
        vec2<f32>( 0.5, -0.5),
        vec2<f32>( 0.5,  0.5),
    );

    let corner = quad_vertices[vertex_index] * pos_size.z;
    let rot = pos_size.w;
    let rotated = vec2<f32>(
        corner.x * cos(rot) - corner.y * sin(rot),
        corner.x * sin(rot) + corner.y * cos(rot),
    );
    let world = pos_size.xy + rotated;

    let ndc = vec2<f32>(
        world.x / globals.surface_size.x * 2.0 - 1.0,
        1.0 - world.y / globals.surface_size.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
