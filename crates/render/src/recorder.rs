use crate::backend::{RenderBackend, RenderError};
use glam::Mat4;
use std::fmt::Write;

/// One call made against a backend.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    SetUniform { name: String, value: Mat4 },
    UploadVertices(Vec<f32>),
    Draw { index_count: u32 },
}

/// Backend that records every command instead of drawing.
///
/// Used by the CLI to inspect frames without a GPU, and by tests to check
/// what a frame submits.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<RenderCommand>,
    frames: u64,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Number of draws recorded.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Last value set for a uniform, if any.
    pub fn uniform(&self, name: &str) -> Option<Mat4> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::SetUniform { name: n, value } if n == name => Some(*value),
            _ => None,
        })
    }

    /// Human-readable log of the recorded commands.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            match command {
                RenderCommand::SetUniform { name, value } => {
                    let _ = writeln!(out, "uniform {name}:");
                    for row in 0..4 {
                        let r = value.row(row);
                        let _ = writeln!(
                            out,
                            "  [{:>9.4} {:>9.4} {:>9.4} {:>9.4}]",
                            r.x, r.y, r.z, r.w
                        );
                    }
                }
                RenderCommand::UploadVertices(data) => {
                    let _ = writeln!(out, "upload {} floats", data.len());
                    for v in data.chunks(tetraview_common::Vertex::FLOATS) {
                        let _ = writeln!(
                            out,
                            "  pos=({:.4}, {:.4}, {:.4}) rgb=({:.1}, {:.1}, {:.1})",
                            v[0], v[1], v[2], v[3], v[4], v[5]
                        );
                    }
                }
                RenderCommand::Draw { index_count } => {
                    let _ = writeln!(out, "draw {index_count} indices");
                }
            }
        }
        out
    }
}

impl RenderBackend for CommandRecorder {
    type Error = RenderError;

    fn set_uniform(&mut self, name: &str, value: Mat4) -> Result<(), RenderError> {
        RenderError::uniform_slot(name)?;
        self.commands.push(RenderCommand::SetUniform {
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    fn upload_vertices(&mut self, data: &[f32]) -> Result<(), RenderError> {
        RenderError::check_vertices(data)?;
        self.commands.push(RenderCommand::UploadVertices(data.to_vec()));
        Ok(())
    }

    fn draw(&mut self, index_count: u32) -> Result<(), RenderError> {
        RenderError::check_draw(index_count)?;
        self.commands.push(RenderCommand::Draw { index_count });
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::submit_frame;
    use crate::projection::Projection;
    use tetraview_common::Key;
    use tetraview_kernel::Scene;

    #[test]
    fn frame_submits_uniforms_upload_and_draw_in_order() {
        let scene = Scene::default();
        let mut rec = CommandRecorder::new();
        submit_frame(&mut rec, &scene, &Projection::default()).unwrap();

        let names: Vec<&str> = rec
            .commands()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::SetUniform { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, ["model", "view", "projection"]);

        assert_eq!(rec.commands().len(), 5);
        match &rec.commands()[3] {
            RenderCommand::UploadVertices(data) => {
                assert_eq!(data.len(), 24);
                assert_eq!(data.as_slice(), scene.mesh().interleaved().as_slice());
            }
            other => panic!("expected upload, got {other:?}"),
        }
        assert_eq!(rec.commands()[4], RenderCommand::Draw { index_count: 12 });
        assert_eq!(rec.frames(), 1);
    }

    #[test]
    fn view_uniform_tracks_camera() {
        let mut scene = Scene::default();
        let mut rec = CommandRecorder::new();
        submit_frame(&mut rec, &scene, &Projection::default()).unwrap();
        let before = rec.uniform("view").unwrap();

        scene.handle_key(Key::Left, false);
        submit_frame(&mut rec, &scene, &Projection::default()).unwrap();
        let after = rec.uniform("view").unwrap();

        assert_ne!(before, after);
        assert_eq!(after, scene.view_matrix());
        assert_eq!(rec.frames(), 2);
    }

    #[test]
    fn rejects_unknown_uniform() {
        let mut rec = CommandRecorder::new();
        let err = rec.set_uniform("normal_matrix", Mat4::IDENTITY).unwrap_err();
        assert_eq!(err, RenderError::UnknownUniform("normal_matrix".into()));
        assert!(rec.commands().is_empty());
    }

    #[test]
    fn rejects_partial_vertex() {
        let mut rec = CommandRecorder::new();
        assert!(rec.upload_vertices(&[0.0; 5]).is_err());
        assert_eq!(rec.frames(), 0);
    }

    #[test]
    fn text_log_lists_every_command() {
        let mut rec = CommandRecorder::new();
        submit_frame(&mut rec, &Scene::default(), &Projection::default()).unwrap();
        let text = rec.to_text();
        assert!(text.contains("uniform model:"));
        assert!(text.contains("uniform projection:"));
        assert!(text.contains("upload 24 floats"));
        assert!(text.contains("draw 12 indices"));
        assert!(text.contains("rgb=(1.0, 0.0, 0.0)"));
    }

    #[test]
    fn clear_keeps_frame_count() {
        let mut rec = CommandRecorder::new();
        submit_frame(&mut rec, &Scene::default(), &Projection::default()).unwrap();
        rec.clear();
        assert!(rec.commands().is_empty());
        assert_eq!(rec.frames(), 1);
    }
}
