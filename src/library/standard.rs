// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The standard pass library.
//!
//! Declares the ports and parameter schemas of the common passes a path
//! tracing pipeline is assembled from. The passes themselves run in the host;
//! here they are [`PassDescriptor`]s with opaque bodies.
//!
//! | Pass type              | Inputs                        | Outputs                                  |
//! |------------------------|-------------------------------|------------------------------------------|
//! | `VBufferRT`            |                               | `vbuffer`, `time`?                       |
//! | `GBufferRT`            |                               | `posW`, `normW`, ... , `vbuffer`?, ...   |
//! | `BasicPathTracer`      | `vbuffer`                     | `color`, `albedo`?, `time`?              |
//! | `MegakernelPathTracer` | `vbuffer`, G-buffer channels? | `color`, `albedo`?, `time`?              |
//! | `RadianceRebuilder`    | `vbuffer`, G-buffer channels? | `color`, `albedo`?, `time`?              |
//! | `AccumulatePass`       | `input`                       | `output`                                 |
//! | `ToneMapper`           | `src`                         | `dst`                                    |
//!
//! `?` marks optional channels.

use crate::errors::RegistryError;
use crate::graph::{ParamKind, ParamSpec, Port};
use crate::library::PassDescriptor;
use crate::registry::PassRegistry;
use crate::traits::PassLibrary;

pub const VBUFFER: &str = "vbuffer";
pub const RGBA32F: &str = "rgba32f";
pub const R32U: &str = "r32u";
pub const RGBA8_SRGB: &str = "rgba8unorm_srgb";
pub const RG32F: &str = "rg32f";

const IO_SIZES: [&str; 6] = ["Default", "Fixed", "Full", "Half", "Quarter", "Double"];
const SAMPLE_PATTERNS: [&str; 4] = ["Center", "DirectX", "Halton", "Stratified"];
const CULL_MODES: [&str; 3] = ["CullNone", "CullFront", "CullBack"];

/// Material and geometry channels a G-buffer pass writes and the path
/// tracers read when they do not reconstruct hits from the visibility buffer.
/// Pairs of (path tracer input, G-buffer output).
const GBUFFER_CHANNELS: [(&str, &str); 9] = [
    ("posW", "posW"),
    ("normalW", "normW"),
    ("tangentW", "tangentW"),
    ("faceNormalW", "faceNormalW"),
    ("viewW", "viewW"),
    ("mtlDiffOpacity", "diffuseOpacity"),
    ("mtlSpecRough", "specRough"),
    ("mtlEmissive", "emissive"),
    ("mtlParams", "matlExtra"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLibrary;

impl PassLibrary for StandardLibrary {
    fn name(&self) -> &str {
        "standard"
    }

    fn register_passes(&self, registry: &mut PassRegistry) -> Result<(), RegistryError> {
        registry.register("VBufferRT", vbuffer_rt())?;
        registry.register("GBufferRT", gbuffer_rt())?;
        registry.register("BasicPathTracer", basic_path_tracer())?;
        registry.register(
            "MegakernelPathTracer",
            shading_path_tracer("Megakernel path tracer"),
        )?;
        registry.register(
            "RadianceRebuilder",
            shading_path_tracer("Path tracer that rebuilds per-pixel radiance from precomputed data"),
        )?;
        registry.register("AccumulatePass", accumulate_pass())?;
        registry.register("ToneMapper", tone_mapper())?;
        Ok(())
    }
}

fn output_size() -> ParamSpec {
    ParamSpec::optional("outputSize", ParamKind::enumeration(IO_SIZES), "Default")
}

fn vbuffer_rt() -> PassDescriptor {
    PassDescriptor::new("Ray traced visibility buffer")
        .port(Port::output("vbuffer").with_kind(VBUFFER).describe("Packed hit information"))
        .port(Port::output("time").with_kind(R32U).optional().describe("Per-pixel execution time"))
        .params(raster_params())
        .param(ParamSpec::optional("useDOF", ParamKind::Bool, true))
}

/// Parameters shared by the visibility and G-buffer passes
fn raster_params() -> Vec<ParamSpec> {
    vec![
        output_size(),
        ParamSpec::optional("samplePattern", ParamKind::enumeration(SAMPLE_PATTERNS), "Center"),
        ParamSpec::optional("sampleCount", ParamKind::Int, 16),
        ParamSpec::optional("useAlphaTest", ParamKind::Bool, true),
        ParamSpec::maybe("disableAlphaTest", ParamKind::Bool).describe("Legacy inverse of useAlphaTest"),
        ParamSpec::optional("adjustShadingNormals", ParamKind::Bool, true),
        ParamSpec::optional("forceCullMode", ParamKind::Bool, false),
        ParamSpec::optional("cull", ParamKind::enumeration(CULL_MODES), "CullBack"),
        ParamSpec::optional("useTraceRayInline", ParamKind::Bool, false),
    ]
}

fn gbuffer_rt() -> PassDescriptor {
    let mut descriptor = PassDescriptor::new("Ray traced geometry buffer");
    for (_, channel) in GBUFFER_CHANNELS {
        let port = Port::output(channel).with_kind(RGBA32F);
        // viewW is only written when depth of field is enabled
        descriptor = descriptor.port(if channel == "viewW" { port.optional() } else { port });
    }
    descriptor
        .port(Port::output("texC").with_kind(RG32F).describe("Texture coordinate"))
        .port(Port::output("vbuffer").with_kind(VBUFFER).optional())
        .port(Port::output("mvec").with_kind(RG32F).optional().describe("Motion vector"))
        .port(Port::output("time").with_kind(R32U).optional().describe("Per-pixel execution time"))
        .params(raster_params())
        .param(ParamSpec::optional(
            "texLOD",
            ParamKind::enumeration(["UseMip0", "RayCones", "RayDiffsIsotropic", "RayDiffsAnisotropic"]),
            "UseMip0",
        ))
}

fn basic_path_tracer() -> PassDescriptor {
    PassDescriptor::new("Basic path tracer")
        .port(Port::input("vbuffer").with_kind(VBUFFER))
        .port(Port::output("color").with_kind(RGBA32F).describe("Output color (linear)"))
        .port(
            Port::output("albedo")
                .with_kind(RGBA32F)
                .optional()
                .describe("Surface albedo or background color"),
        )
        .port(Port::output("time").with_kind(R32U).optional().describe("Per-pixel execution time"))
        .param(ParamSpec::optional("samplesPerPixel", ParamKind::Int, 1))
        .param(ParamSpec::optional("maxBounces", ParamKind::Int, 3))
        .param(ParamSpec::optional("useAlphaTest", ParamKind::Bool, true))
        .param(ParamSpec::maybe("params", ParamKind::Dict).describe("Shared path tracer settings"))
}

/// A path tracer that reads hits from a visibility buffer and can take
/// precomputed G-buffer channels instead of reconstructing them.
fn shading_path_tracer(description: &str) -> PassDescriptor {
    let mut descriptor = PassDescriptor::new(description).port(Port::input("vbuffer").with_kind(VBUFFER));
    for (channel, _) in GBUFFER_CHANNELS {
        descriptor = descriptor.port(Port::input(channel).with_kind(RGBA32F).optional());
    }
    descriptor
        .port(Port::output("color").with_kind(RGBA32F).describe("Output color (linear)"))
        .port(Port::output("albedo").with_kind(RGBA32F).optional())
        .port(Port::output("time").with_kind(R32U).optional())
        .param(ParamSpec::maybe("mSharedParams", ParamKind::Dict).describe("Shared path tracer settings"))
        .param(ParamSpec::optional("mSelectedSampleGenerator", ParamKind::Int, 1))
        .param(ParamSpec::optional(
            "mSelectedEmissiveSampler",
            ParamKind::enumeration(["Uniform", "LightBVH", "Power"]),
            "LightBVH",
        ))
        .param(ParamSpec::maybe("mUniformSamplerOptions", ParamKind::Dict))
        .param(ParamSpec::maybe("mLightBVHSamplerOptions", ParamKind::Dict))
}

fn accumulate_pass() -> PassDescriptor {
    PassDescriptor::new("Temporal accumulation")
        .port(Port::input("input").with_kind("*"))
        .port(Port::output("output").with_kind(RGBA32F))
        .param(ParamSpec::optional("enabled", ParamKind::Bool, true))
        .param(ParamSpec::maybe("enableAccumulation", ParamKind::Bool).describe("Legacy name of enabled"))
        .param(output_size())
        .param(ParamSpec::optional("autoReset", ParamKind::Bool, true))
        .param(ParamSpec::optional(
            "precisionMode",
            ParamKind::enumeration(["Double", "Single", "SingleCompensated"]),
            "Single",
        ))
        .param(ParamSpec::optional("subFrameCount", ParamKind::Int, 0))
        .param(ParamSpec::optional("maxAccumulatedFrames", ParamKind::Int, 0))
}

fn tone_mapper() -> PassDescriptor {
    PassDescriptor::new("Tone mapping and exposure")
        .port(Port::input("src").with_kind(RGBA32F))
        .port(Port::output("dst").with_kind(RGBA8_SRGB))
        .param(output_size())
        .param(ParamSpec::optional("useSceneMetadata", ParamKind::Bool, true))
        .param(ParamSpec::optional("exposureCompensation", ParamKind::Float, 0.0))
        .param(ParamSpec::optional("autoExposure", ParamKind::Bool, false))
        .param(ParamSpec::optional("filmSpeed", ParamKind::Float, 100.0))
        .param(ParamSpec::optional("whiteBalance", ParamKind::Bool, false))
        .param(ParamSpec::optional("whitePoint", ParamKind::Float, 6500.0))
        .param(ParamSpec::optional(
            "operator",
            ParamKind::enumeration([
                "Linear",
                "Reinhard",
                "ReinhardModified",
                "HejiHableAlu",
                "HableUc2",
                "Aces",
            ]),
            "Aces",
        ))
        .param(ParamSpec::optional("clamp", ParamKind::Bool, true))
        .param(ParamSpec::optional("whiteMaxLuminance", ParamKind::Float, 1.0))
        .param(ParamSpec::optional("whiteScale", ParamKind::Float, 11.2))
        .param(ParamSpec::optional("fNumber", ParamKind::Float, 1.0))
        .param(ParamSpec::optional("shutter", ParamKind::Float, 1.0))
        .param(ParamSpec::optional(
            "exposureMode",
            ParamKind::enumeration(["AperturePriority", "ShutterPriority"]),
            "AperturePriority",
        ))
}
