/// Prepends the shared full-screen triangle vertex stage to a fragment body.
macro_rules! fullscreen_shader {
    ($body:literal) => {
        concat!(
            r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) ndc: vec2<f32>,
};

@vertex
fn vs_fullscreen(@builtin(vertex_index) idx: u32) -> VertexOutput {
    let uv = vec2<f32>(f32((idx << 1u) & 2u), f32(idx & 2u));
    var out: VertexOutput;
    out.position = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.ndc = uv * 2.0 - 1.0;
    out.uv = vec2<f32>(uv.x, 1.0 - uv.y);
    return out;
}
"#,
            $body
        )
    };
}

/// Curved-space raymarcher. Marches each screen ray through the current
/// galaxy, bending it toward massive bodies, and carries it into the other
/// galaxy when it passes through the wormhole.
pub const RAYMARCH_SHADER: &str = fullscreen_shader!(
    r#"
struct Scene {
    ray_matrix: mat4x4<f32>,
    camera_position: vec4<f32>,
    wormhole: vec4<f32>,
    blackhole: vec4<f32>,
    saturn: vec4<f32>,
    planet: vec4<f32>,
    blackhole_disk: vec4<f32>,
    saturn_rings: vec4<f32>,
    planet_diffuse: vec4<f32>,
    planet_specular: vec4<f32>,
    light_direction: vec4<f32>,
    gravity_wormhole: f32,
    gravity_blackhole: f32,
    light_speed: f32,
    step_size: f32,
    start_galaxy: i32,
    _pad0: i32,
    _pad1: i32,
    _pad2: i32,
};

@group(0) @binding(0) var<uniform> scene: Scene;
@group(1) @binding(0) var saturn_tex: texture_2d<f32>;
@group(1) @binding(1) var rings_tex: texture_2d<f32>;
@group(1) @binding(2) var galaxy1_tex: texture_2d<f32>;
@group(1) @binding(3) var galaxy2_tex: texture_2d<f32>;
@group(1) @binding(4) var disk_tex: texture_2d<f32>;
@group(1) @binding(5) var tex_sampler: sampler;

const PI: f32 = 3.14159265;
const MAX_STEPS: i32 = 480;
const ESCAPE_DISTANCE: f32 = 600.0;
const DISK_GLOW: f32 = 2.5;

struct Ray {
    origin: vec3<f32>,
    dir: vec3<f32>,
    galaxy: i32,
};

fn equirect(dir: vec3<f32>) -> vec2<f32> {
    let d = normalize(dir);
    return vec2<f32>(
        atan2(d.z, d.x) / (2.0 * PI) + 0.5,
        acos(clamp(d.y, -1.0, 1.0)) / PI,
    );
}

fn sky(dir: vec3<f32>, galaxy: i32) -> vec3<f32> {
    let uv = equirect(dir);
    if galaxy == 0 {
        return textureSampleLevel(galaxy1_tex, tex_sampler, uv, 0.0).rgb;
    }
    return textureSampleLevel(galaxy2_tex, tex_sampler, uv, 0.0).rgb;
}

// Distance along a unit ray to the sphere's near surface, negative on a miss.
fn hit_sphere(origin: vec3<f32>, dir: vec3<f32>, sphere: vec4<f32>) -> f32 {
    let rel = origin - sphere.xyz;
    let p = dot(rel, dir);
    let d = p * p - dot(rel, rel) + sphere.w * sphere.w;
    if d < 0.0 {
        return -1.0;
    }
    return -p - sqrt(d);
}

fn surface_distance(p: vec3<f32>, sphere: vec4<f32>) -> f32 {
    return max(length(p - sphere.xyz) - sphere.w, 0.0);
}

fn pull(p: vec3<f32>, sphere: vec4<f32>, gravity: f32) -> vec3<f32> {
    let to = sphere.xyz - p;
    let dist2 = max(dot(to, to), 1e-4);
    let c2 = scene.light_speed * scene.light_speed;
    return normalize(to) * gravity * sphere.w / (dist2 * c2);
}

// Ring texel where the segment a->b crosses the ring plane, alpha zero if not.
// Ring radii are in units of the host body's radius.
fn ring_sample(
    a: vec3<f32>,
    b: vec3<f32>,
    host: vec4<f32>,
    ring: vec4<f32>,
    tex_is_disk: bool,
) -> vec4<f32> {
    let n = normalize(ring.xyz);
    let sa = dot(a - host.xyz, n);
    let sb = dot(b - host.xyz, n);
    if sa * sb > 0.0 || sa == sb {
        return vec4<f32>(0.0);
    }
    let hit = mix(a, b, sa / (sa - sb));
    let r = length(hit - host.xyz) / host.w;
    let inner = length(ring.xyz);
    if r < inner || r > ring.w {
        return vec4<f32>(0.0);
    }
    let uv = vec2<f32>((r - inner) / (ring.w - inner), 0.5);
    if tex_is_disk {
        return textureSampleLevel(disk_tex, tex_sampler, uv, 0.0);
    }
    return textureSampleLevel(rings_tex, tex_sampler, uv, 0.0);
}

fn shade_saturn(hit: vec3<f32>) -> vec3<f32> {
    let n = normalize(hit - scene.saturn.xyz);
    let albedo = textureSampleLevel(saturn_tex, tex_sampler, equirect(n), 0.0).rgb;
    let lambert = max(dot(n, -scene.light_direction.xyz), 0.0);
    return albedo * (0.03 + lambert);
}

fn shade_planet(hit: vec3<f32>, view: vec3<f32>) -> vec3<f32> {
    let n = normalize(hit - scene.planet.xyz);
    let l = -scene.light_direction.xyz;
    let h = normalize(l - view);
    let diffuse = scene.planet_diffuse.rgb * max(dot(n, l), 0.0);
    let specular = scene.planet_specular.rgb * pow(max(dot(n, h), 0.0), 32.0);
    return 0.02 * scene.planet_diffuse.rgb + diffuse + specular;
}

@fragment
fn fs_raymarch(in: VertexOutput) -> @location(0) vec4<f32> {
    let screen = vec4<f32>(in.ndc, 1.0, 0.0);
    var ray = Ray(
        scene.camera_position.xyz,
        normalize((scene.ray_matrix * screen).xyz),
        scene.start_galaxy,
    );

    var color = vec3<f32>(0.0);
    var transmittance = 1.0;

    for (var i = 0; i < MAX_STEPS; i++) {
        let p = ray.origin;
        var nearest = surface_distance(p, scene.wormhole);
        var accel = pull(p, scene.wormhole, scene.gravity_wormhole);
        if ray.galaxy == 0 {
            nearest = min(nearest, surface_distance(p, scene.saturn));
        } else {
            nearest = min(nearest, surface_distance(p, scene.blackhole));
            nearest = min(nearest, surface_distance(p, scene.planet));
            accel += pull(p, scene.blackhole, scene.gravity_blackhole);
        }
        if nearest > ESCAPE_DISTANCE {
            break;
        }

        let h = scene.step_size * clamp(0.2 * nearest, 0.02, 10.0);
        let next = p + ray.dir * h;

        let tw = hit_sphere(p, ray.dir, scene.wormhole);
        if tw >= 0.0 && tw <= h {
            let entry = p + ray.dir * tw;
            let axis = normalize(entry - scene.wormhole.xyz);
            ray.origin = scene.wormhole.xyz + (scene.wormhole.xyz - entry) * 1.0001;
            ray.dir = 2.0 * dot(axis, ray.dir) * axis - ray.dir;
            ray.galaxy = 1 - ray.galaxy;
            continue;
        }

        if ray.galaxy == 0 {
            let rings = ring_sample(p, next, scene.saturn, scene.saturn_rings, false);
            let facing = abs(dot(normalize(scene.saturn_rings.xyz), scene.light_direction.xyz));
            let lit = rings.rgb * (0.1 + facing);
            color += transmittance * rings.a * lit;
            transmittance *= 1.0 - rings.a;

            let ts = hit_sphere(p, ray.dir, scene.saturn);
            if ts >= 0.0 && ts <= h {
                color += transmittance * shade_saturn(p + ray.dir * ts);
                transmittance = 0.0;
                break;
            }
        } else {
            let disk = ring_sample(p, next, scene.blackhole, scene.blackhole_disk, true);
            color += transmittance * disk.a * disk.rgb * DISK_GLOW;
            transmittance *= 1.0 - disk.a;

            let tp = hit_sphere(p, ray.dir, scene.planet);
            if tp >= 0.0 && tp <= h {
                color += transmittance * shade_planet(p + ray.dir * tp, ray.dir);
                transmittance = 0.0;
                break;
            }
            if length(next - scene.blackhole.xyz) < scene.blackhole.w {
                transmittance = 0.0;
                break;
            }
        }

        ray.origin = next;
        ray.dir = normalize(ray.dir + accel * h);

        if transmittance < 0.01 {
            break;
        }
    }

    color += transmittance * sky(ray.dir, ray.galaxy);
    return vec4<f32>(color, 1.0);
}
"#
);

/// Separable Gaussian blur and additive composite.
pub const BLOOM_SHADER: &str = fullscreen_shader!(
    r#"
struct Blur {
    direction: vec2<f32>,
    half_taps: u32,
    strength: f32,
    weights: array<vec4<f32>, 4>,
};

@group(0) @binding(0) var<uniform> blur: Blur;
@group(1) @binding(0) var input_tex: texture_2d<f32>;
@group(1) @binding(1) var input_sampler: sampler;

fn weight(i: u32) -> f32 {
    return blur.weights[i / 4u][i % 4u];
}

@fragment
fn fs_blur(in: VertexOutput) -> @location(0) vec4<f32> {
    var sum = textureSample(input_tex, input_sampler, in.uv).rgb * weight(0u);
    for (var i = 1u; i <= blur.half_taps; i++) {
        let offset = blur.direction * f32(i);
        let w = weight(i);
        sum += textureSample(input_tex, input_sampler, in.uv + offset).rgb * w;
        sum += textureSample(input_tex, input_sampler, in.uv - offset).rgb * w;
    }
    return vec4<f32>(sum, 1.0);
}

@fragment
fn fs_composite(in: VertexOutput) -> @location(0) vec4<f32> {
    let bloom = textureSample(input_tex, input_sampler, in.uv).rgb;
    return vec4<f32>(bloom * blur.strength, 1.0);
}
"#
);

/// Film grain, scanlines and optional grayscale.
pub const FILM_SHADER: &str = fullscreen_shader!(
    r#"
struct Film {
    time: f32,
    noise_intensity: f32,
    scanline_intensity: f32,
    scanline_count: f32,
    grayscale: u32,
    _pad0: u32,
    _pad1: u32,
    _pad2: u32,
};

@group(0) @binding(0) var<uniform> film: Film;
@group(1) @binding(0) var input_tex: texture_2d<f32>;
@group(1) @binding(1) var input_sampler: sampler;

fn rand(co: vec2<f32>) -> f32 {
    return fract(sin(dot(co, vec2<f32>(12.9898, 78.233))) * 43758.5453);
}

@fragment
fn fs_film(in: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(input_tex, input_sampler, in.uv).rgb;

    let dx = rand(in.uv + film.time);
    var c = base + base * clamp(0.1 + dx, 0.0, 1.0);
    let sc = vec2<f32>(sin(in.uv.y * film.scanline_count), cos(in.uv.y * film.scanline_count));
    c += base * vec3<f32>(sc.x, sc.y, sc.x) * film.scanline_intensity;
    c = base + clamp(film.noise_intensity, 0.0, 1.0) * (c - base);

    if film.grayscale != 0u {
        c = vec3<f32>(dot(c, vec3<f32>(0.3, 0.59, 0.11)));
    }
    return vec4<f32>(clamp(c, vec3<f32>(0.0), vec3<f32>(1.0)), 1.0);
}
"#
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shader_has_the_fullscreen_stage() {
        for source in [RAYMARCH_SHADER, BLOOM_SHADER, FILM_SHADER] {
            assert!(source.contains("fn vs_fullscreen"));
        }
    }

    #[test]
    fn entry_points_match_pipelines() {
        assert!(RAYMARCH_SHADER.contains("fn fs_raymarch"));
        assert!(BLOOM_SHADER.contains("fn fs_blur"));
        assert!(BLOOM_SHADER.contains("fn fs_composite"));
        assert!(FILM_SHADER.contains("fn fs_film"));
    }
}
