//! Command implementations behind the `aluframe` binary.
//!
//! Each command renders its report into a `String` so the binary only has to
//! print it and tests can inspect it directly.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use alu_types::{keys, ProfileSpec, ProfileTags};
use anyhow::{bail, Context, Result};
use profile_catalog::{Catalog, CatalogFilter};
use profile_ops::{
    bill_of_materials, generate_profile_with_config, GeneratedProfile, GeneratorConfig,
    KernelBackend,
};
use solid_kernel::{export_ascii_stl, export_binary_stl};
use tracing::info;

/// Parse an `x,y,z` placement in working units.
pub fn parse_point(s: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{}'", s));
    }
    let mut point = [0.0; 3];
    for (slot, part) in point.iter_mut().zip(&parts) {
        let value: f64 = part
            .parse()
            .map_err(|_| format!("'{}' is not a number", part))?;
        if !value.is_finite() {
            return Err(format!("'{}' is not finite", part));
        }
        *slot = value;
    }
    Ok(point)
}

/// Catalog from `path`, or the bundled one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Catalog::builtin().context("bundled catalog is invalid"),
    }
}

/// Generator configuration from a JSON file, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    GeneratorConfig::from_json(&json)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn find_profile<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a ProfileSpec> {
    match catalog.find(id) {
        Some(spec) => Ok(spec),
        None => bail!("no profile '{}' in the catalog", id),
    }
}

/// Table of the catalog entries matching `filter`.
pub fn list_profiles(catalog: &Catalog, filter: &CatalogFilter) -> String {
    let matches = catalog.filter(filter);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<12} {:<4} {:>6} {:>8} {:>8} {:>6} {:>6} {:>8}",
        "id", "name", "std", "series", "width", "height", "slot", "wall", "length"
    );
    for spec in &matches {
        let _ = writeln!(
            out,
            "{:<10} {:<12} {:<4} {:>6} {:>8} {:>8} {:>6} {:>6} {:>8}",
            spec.id,
            spec.name,
            spec.standard.code(),
            spec.series,
            spec.width,
            spec.height,
            spec.slot_width,
            spec.wall_thickness,
            spec.default_length
        );
    }
    let _ = writeln!(out, "{} of {} profiles", matches.len(), catalog.len());
    out
}

/// Options of the `generate` command.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub id: String,
    pub at: [f64; 3],
    /// Overrides the catalog default length, in millimeters.
    pub length_mm: Option<f64>,
    /// Overrides the backend named in the config.
    pub backend: Option<KernelBackend>,
    pub config: Option<PathBuf>,
    pub stl: Option<PathBuf>,
    pub ascii: bool,
}

/// Generate one profile and render a report. Writes the STL file when asked.
pub fn run_generate(catalog: &Catalog, request: &GenerateRequest) -> Result<String> {
    let spec = find_profile(catalog, &request.id)?;
    let spec = match request.length_mm {
        Some(length) => spec.with_length(length),
        None => spec.clone(),
    };

    let mut config = load_config(request.config.as_deref())?;
    if let Some(backend) = request.backend {
        config = config.with_backend(backend);
    }

    let profile = generate_profile_with_config(&spec, request.at, &config)
        .with_context(|| format!("failed to generate {}", spec.id))?;
    info!(
        profile = %spec.id,
        backend = %profile.diagnostics.backend,
        used_boolean = profile.used_boolean_construction,
        "generated profile"
    );

    let mut out = render_profile(&spec, &profile);
    if let Some(path) = &request.stl {
        write_stl(&profile, &spec.id, path, request.ascii)?;
        let _ = writeln!(out, "stl:         {}", path.display());
    }
    Ok(out)
}

fn render_profile(spec: &ProfileSpec, profile: &GeneratedProfile) -> String {
    let mesh = &profile.solid_mesh;
    let bounds = mesh.bounding_box();
    let size = bounds.size();
    let mut out = String::new();
    let _ = writeln!(out, "profile:     {} ({})", spec.id, spec.name);
    let _ = writeln!(out, "backend:     {}", profile.diagnostics.backend);
    let _ = writeln!(
        out,
        "slots:       {}",
        if profile.used_boolean_construction {
            "cut"
        } else {
            "plain box"
        }
    );
    let _ = writeln!(
        out,
        "mesh:        {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    );
    let _ = writeln!(
        out,
        "bounds:      [{:.6}, {:.6}, {:.6}] .. [{:.6}, {:.6}, {:.6}]",
        bounds.min[0], bounds.min[1], bounds.min[2], bounds.max[0], bounds.max[1], bounds.max[2]
    );
    let _ = writeln!(
        out,
        "size:        {:.6} x {:.6} x {:.6}",
        size[0], size[1], size[2]
    );
    let _ = writeln!(out, "volume:      {:.9}", mesh.volume());
    let _ = writeln!(out, "kernel time: {:.3} ms", profile.diagnostics.kernel_time_ms);
    for warning in &profile.diagnostics.warnings {
        let _ = writeln!(out, "warning:     {}", warning);
    }
    out
}

fn write_stl(profile: &GeneratedProfile, name: &str, path: &Path, ascii: bool) -> Result<()> {
    let bytes = if ascii {
        export_ascii_stl(&profile.solid_mesh, name)?.into_bytes()
    } else {
        export_binary_stl(&profile.solid_mesh, name)?
    };
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), ascii, "wrote stl");
    Ok(())
}

/// Split a `bom` item of the form `id` or `id:length_mm`.
pub fn parse_bom_item(item: &str) -> Result<(&str, Option<f64>)> {
    match item.rsplit_once(':') {
        Some((id, length)) => {
            let length: f64 = length
                .trim()
                .parse()
                .with_context(|| format!("invalid length in '{}'", item))?;
            Ok((id.trim(), Some(length)))
        }
        None => Ok((item.trim(), None)),
    }
}

/// Generate every item and aggregate the resulting tags.
pub fn run_bom(catalog: &Catalog, items: &[String], config: &GeneratorConfig) -> Result<String> {
    if items.is_empty() {
        bail!("no profiles given");
    }
    let mut tag_sets: Vec<ProfileTags> = Vec::with_capacity(items.len());
    for item in items {
        let (id, length) = parse_bom_item(item)?;
        let spec = find_profile(catalog, id)?;
        let spec = match length {
            Some(length) => spec.with_length(length),
            None => spec.clone(),
        };
        let profile = generate_profile_with_config(&spec, [0.0; 3], config)
            .with_context(|| format!("failed to generate {}", spec.id))?;
        tag_sets.push(profile.tags);
    }

    let bom = bill_of_materials(&tag_sets);
    info!(lines = bom.lines.len(), pieces = bom.total_count, "bill of materials");

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<12} {:>6} {:>12}",
        "id", keys::ALU_TYPE, "count", "length_mm"
    );
    for line in &bom.lines {
        let _ = writeln!(
            out,
            "{:<10} {:<12} {:>6} {:>12.1}",
            line.profile_id, line.name, line.count, line.total_length_mm
        );
    }
    let _ = writeln!(
        out,
        "total: {} pieces, {:.1} mm",
        bom.total_count, bom.total_length_mm
    );
    Ok(out)
}
