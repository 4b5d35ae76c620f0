use std::collections::VecDeque;

use crate::Result;

/// 出力行の種類（表示側の装飾に使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Plain,
    Heading,
    Success,
    Failure,
}

/// 1 行単位の対話入出力
pub trait Console {
    /// プロンプトを表示して 1 行読む（入力終端は空行扱い）
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    fn write_styled(&mut self, kind: LineKind, line: &str) -> Result<()>;

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.write_styled(LineKind::Plain, line)
    }
}

/// 事前に用意した回答を返し、出力を記録する Console
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
    pub kinds: Vec<LineKind>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }

    fn write_styled(&mut self, kind: LineKind, line: &str) -> Result<()> {
        self.output.push(line.to_string());
        self.kinds.push(kind);
        Ok(())
    }
}
