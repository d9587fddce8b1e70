use base64::Engine;
use std::path::{Path, PathBuf};

fn push_f32s(buffer: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        buffer.extend_from_slice(&v.to_le_bytes());
    }
}

/// A 2 x 1 quad in the XY plane with one translation clip per duration.
/// Clip 0 is named "intro", clip 1 "idle", the rest "extraN".
pub fn logo_gltf(clip_durations: &[f32]) -> Vec<u8> {
    let mut buffer = Vec::new();
    push_f32s(
        &mut buffer,
        &[-1.0, -0.5, 0.0, 1.0, -0.5, 0.0, 1.0, 0.5, 0.0, -1.0, 0.5, 0.0],
    );
    for i in [0u16, 1, 2, 0, 2, 3] {
        buffer.extend_from_slice(&i.to_le_bytes());
    }
    buffer.extend_from_slice(&[0, 0, 0, 0]);

    let mut buffer_views = vec![
        r#"{"buffer":0,"byteOffset":0,"byteLength":48,"target":34962}"#.to_string(),
        r#"{"buffer":0,"byteOffset":48,"byteLength":12,"target":34963}"#.to_string(),
    ];
    let mut accessors = vec![
        r#"{"bufferView":0,"componentType":5126,"count":4,"type":"VEC3","min":[-1.0,-0.5,0.0],"max":[1.0,0.5,0.0]}"#
            .to_string(),
        r#"{"bufferView":1,"componentType":5123,"count":6,"type":"SCALAR"}"#.to_string(),
    ];
    let mut animations = Vec::new();

    for (i, &duration) in clip_durations.iter().enumerate() {
        let times_offset = buffer.len();
        push_f32s(&mut buffer, &[0.0, duration]);
        let values_offset = buffer.len();
        push_f32s(&mut buffer, &[0.0, 0.0, 0.0, 0.0, 0.25, 0.0]);

        let times_view = buffer_views.len();
        buffer_views.push(format!(
            r#"{{"buffer":0,"byteOffset":{times_offset},"byteLength":8}}"#
        ));
        buffer_views.push(format!(
            r#"{{"buffer":0,"byteOffset":{values_offset},"byteLength":24}}"#
        ));

        let times_accessor = accessors.len();
        accessors.push(format!(
            r#"{{"bufferView":{times_view},"componentType":5126,"count":2,"type":"SCALAR","min":[0.0],"max":[{duration:?}]}}"#
        ));
        accessors.push(format!(
            r#"{{"bufferView":{},"componentType":5126,"count":2,"type":"VEC3"}}"#,
            times_view + 1
        ));

        let name = match i {
            0 => "intro".to_string(),
            1 => "idle".to_string(),
            n => format!("extra{n}"),
        };
        animations.push(format!(
            r#"{{"name":"{name}","channels":[{{"sampler":0,"target":{{"node":0,"path":"translation"}}}}],"samplers":[{{"input":{times_accessor},"output":{},"interpolation":"LINEAR"}}]}}"#,
            times_accessor + 1
        ));
    }

    let animations = if animations.is_empty() {
        String::new()
    } else {
        format!(",\n  \"animations\": [{}]", animations.join(","))
    };
    let data = base64::engine::general_purpose::STANDARD.encode(&buffer);
    let json = format!(
        r#"{{
  "asset": {{"version": "2.0"}},
  "scene": 0,
  "scenes": [{{"nodes": [0]}}],
  "nodes": [{{"name": "logo", "mesh": 0}}],
  "meshes": [{{"name": "logo", "primitives": [{{"attributes": {{"POSITION": 0}}, "indices": 1}}]}}],
  "buffers": [{{"byteLength": {}, "uri": "data:application/octet-stream;base64,{data}"}}],
  "bufferViews": [{}],
  "accessors": [{}]{animations}
}}"#,
        buffer.len(),
        buffer_views.join(","),
        accessors.join(",")
    );
    json.into_bytes()
}

pub fn write_logo_gltf(dir: &Path, clip_durations: &[f32]) -> PathBuf {
    let path = dir.join("Logo.gltf");
    std::fs::write(&path, logo_gltf(clip_durations)).expect("write fixture");
    path
}
