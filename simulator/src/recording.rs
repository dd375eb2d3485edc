use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use roborally::{Board, BoardSnapshot};
use serde::{Deserialize, Serialize};

/// Collects board snapshots during a game and writes them to one JSON file
/// per game.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    steps: Vec<RecordedStep>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            steps: Vec::new(),
        })
    }

    pub fn store_snapshot(&mut self, round: usize, board: &Board) {
        self.steps.push(RecordedStep {
            round,
            status: board.status_message(),
            snapshot: BoardSnapshot::from(board),
        });
    }

    /// Writes everything stored since the last call, and returns the path
    /// of the file.
    pub fn write_game_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(&filepath)?);
        let recording = GameRecording {
            steps: std::mem::take(&mut self.steps),
        };
        serde_json::to_writer_pretty(writer, &recording)?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Serialize, Deserialize)]
pub struct GameRecording {
    pub steps: Vec<RecordedStep>,
}

#[derive(Serialize, Deserialize)]
pub struct RecordedStep {
    pub round: usize,
    pub status: String,
    pub snapshot: BoardSnapshot,
}
