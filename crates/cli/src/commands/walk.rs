//! `liftcheck walk` — Run an inspection on the terminal.
//!
//! Drives the same turn protocol the HTTP client uses: ask the engine for
//! the next step, answer it, repeat until done. The backup device flow
//! follows when the unit has one.

use liftcheck_config::AppConfig;
use liftcheck_core::record::ResultRecord;
use liftcheck_core::selection::Selection;
use liftcheck_core::step::StepResult;
use liftcheck_data::TableStore;
use liftcheck_engine::{InspectionEngine, InspectionSchema, ResultLayout};
use std::io::{self, BufRead, Write};

pub async fn run(kanri: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = TableStore::load(&config.data);

    if let Some(kanri) = &kanri {
        let site = store.registry().site_name(kanri);
        println!("管理番号: {kanri}  現場名: {site}\n");
    }

    let engine = InspectionEngine::new(
        InspectionSchema::from(&config.schema),
        ResultLayout::contactors(),
        store.primary.table().cloned(),
        store.secondary.table().cloned(),
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let session = drive(&engine, &mut input, &mut output)?;

    let record = engine.assemble(&session.primary, &session.secondary);
    print_record(&mut output, &record)?;
    Ok(())
}

/// Answers collected over one terminal session.
#[derive(Debug, Default)]
pub struct Session {
    pub primary: Selection,
    pub secondary: Selection,
}

/// Run both flows to completion against `input`.
pub fn drive<R: BufRead, W: Write>(
    engine: &InspectionEngine,
    input: &mut R,
    output: &mut W,
) -> Result<Session, Box<dyn std::error::Error>> {
    let mut session = Session::default();

    loop {
        let step = engine.primary_step(&session.primary)?;
        match answer(&step, input, output)? {
            Some((field, value)) => session.primary.insert(field, value),
            None => break,
        }
    }

    let result = &engine.schema().result;
    let has_backup = session.primary.get(&result.backup_presence_column)
        == Some(result.backup_presence_value.as_str());
    if has_backup && engine.has_secondary() {
        writeln!(output, "\n-- 停電時自動着床装置 --")?;
        loop {
            let step = engine.secondary_step(&session.primary, &session.secondary)?;
            match answer(&step, input, output)? {
                Some((field, value)) => session.secondary.insert(field, value),
                None => break,
            }
        }
    }

    Ok(session)
}

/// Resolve one step to a `(field, value)` pair, `None` when the flow is done.
fn answer<R: BufRead, W: Write>(
    step: &StepResult,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<(String, String)>> {
    let resolved = match step {
        StepResult::Done(_) => return Ok(None),
        StepResult::Options { field, values } => {
            let value = choose(field, values, input, output)?;
            (field.clone(), value)
        }
        StepResult::AutoSelect { field, values } => {
            let value = values.first().cloned().unwrap_or_default();
            writeln!(output, "{field}: {value} (自動選択)")?;
            (field.clone(), value)
        }
        StepResult::Skip { field } => {
            writeln!(output, "{field}: (該当なし)")?;
            (field.clone(), String::new())
        }
        StepResult::Comment { field, text } => {
            writeln!(output, "{field}: {text}")?;
            (field.clone(), text.clone())
        }
        StepResult::AutoFill { field, value } => {
            writeln!(output, "{field}: {value} (自動設定)")?;
            (field.clone(), value.clone())
        }
    };
    Ok(Some(resolved))
}

fn choose<R: BufRead, W: Write>(
    field: &str,
    values: &[String],
    input: &mut R,
    output: &mut W,
) -> io::Result<String> {
    if values.is_empty() {
        writeln!(output, "{field}: (候補なし)")?;
        return Ok(String::new());
    }

    writeln!(output, "{field}:")?;
    for (i, value) in values.iter().enumerate() {
        writeln!(output, "  {}) {value}", i + 1)?;
    }

    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=values.len()).contains(&n) => return Ok(values[n - 1].clone()),
            _ => writeln!(output, "1〜{} の番号を入力してください", values.len())?,
        }
    }
}

fn print_record<W: Write>(output: &mut W, record: &ResultRecord) -> io::Result<()> {
    writeln!(output, "\n== 判定結果 ==")?;
    for group in &record.groups {
        writeln!(output, "\n[{}]", group.title)?;
        for row in &group.rows {
            writeln!(output, "  {}: {}", row.label, row.value)?;
        }
    }
    Ok(())
}
