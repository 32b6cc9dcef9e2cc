use glam::Vec4;
use pocket_core::Color;

/// One recorded instruction for the host to replay.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ClearRenderTarget {
        clear_depth: bool,
        clear_color: bool,
        background: Color,
    },
    SetGlobalVector {
        name: &'static str,
        value: Vec4,
    },
    SetGlobalInt {
        name: &'static str,
        value: i32,
    },
    SetGlobalVectorArray {
        name: &'static str,
        values: Vec<Vec4>,
    },
}

/// Transient recording target.
///
/// The pipeline keeps a single buffer alive and cycles it through
/// `begin` -> record -> execute -> `release` for every batch it issues.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    name: &'static str,
    commands: Vec<Command>,
    recording: bool,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, name: &'static str) {
        debug_assert!(
            !self.recording,
            "command buffer '{}' was never released",
            self.name
        );
        self.name = name;
        self.commands.clear();
        self.recording = true;
    }

    /// Drops the recorded commands but keeps the allocation for the next batch.
    pub fn release(&mut self) {
        self.commands.clear();
        self.recording = false;
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn clear_render_target(&mut self, clear_depth: bool, clear_color: bool, background: Color) {
        self.commands.push(Command::ClearRenderTarget {
            clear_depth,
            clear_color,
            background,
        });
    }

    pub fn set_global_vector(&mut self, name: &'static str, value: Vec4) {
        self.commands.push(Command::SetGlobalVector { name, value });
    }

    pub fn set_global_int(&mut self, name: &'static str, value: i32) {
        self.commands.push(Command::SetGlobalInt { name, value });
    }

    pub fn set_global_vector_array(&mut self, name: &'static str, values: &[Vec4]) {
        self.commands.push(Command::SetGlobalVectorArray {
            name,
            values: values.to_vec(),
        });
    }
}
