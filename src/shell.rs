// Interactive shell — one command per line in, one JSON document per response out.
// Rejected inputs print nothing; the reason only goes to the log.

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::commands::settings::AppSettings;
use crate::commands::{medicine, nutrition, symptoms, system};
use crate::models::{MedicineForm, NutritionForm};
use crate::session::SessionState;

const HELP: &str = "\
commands:
  add <name>|<dosage>|<morning|afternoon|night>|<days>
  remove <id>
  list
  schedule
  due <hour>
  say <symptom description>
  typing
  history
  nutrition <age>|<male|female|other>|<vegetarian|non-vegetarian|vegan>|<symptom,symptom,...>
  last
  status
  help
  quit
This is not medical advice. Always consult a healthcare professional.";

/// Where responses go. Shared with the tasks that deliver delayed replies.
pub type Output = Arc<Mutex<dyn Write + Send>>;

#[derive(Debug, PartialEq)]
pub enum ShellCommand {
    Add(MedicineForm),
    Remove(Uuid),
    List,
    Schedule,
    Due(u32),
    Say(String),
    Typing,
    History,
    Nutrition(NutritionForm),
    LastAnalysis,
    Status,
    Help,
    Quit,
}

fn fields<const N: usize>(args: &str, usage: &str) -> Result<[String; N]> {
    let parts: Vec<String> = args.split('|').map(|p| p.trim().to_string()).collect();
    parts
        .try_into()
        .map_err(|_| anyhow!("expected {} fields separated by '|': {}", N, usage))
}

/// Parse one input line. Empty lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let args = args.trim();

    let command = match verb.to_lowercase().as_str() {
        "add" => {
            let [name, dosage, time, duration] = fields::<4>(args, "add <name>|<dosage>|<time>|<days>")?;
            ShellCommand::Add(MedicineForm {
                name,
                dosage,
                time_of_day: time.parse()?,
                duration,
            })
        }
        "remove" | "rm" => {
            let id = Uuid::parse_str(args).with_context(|| format!("invalid medicine id {:?}", args))?;
            ShellCommand::Remove(id)
        }
        "list" => ShellCommand::List,
        "schedule" => ShellCommand::Schedule,
        "due" => {
            let hour = args.parse().with_context(|| format!("invalid hour {:?}", args))?;
            ShellCommand::Due(hour)
        }
        "say" => ShellCommand::Say(args.to_string()),
        "typing" => ShellCommand::Typing,
        "history" => ShellCommand::History,
        "nutrition" => {
            let [age, gender, diet, symptoms] =
                fields::<4>(args, "nutrition <age>|<gender>|<diet>|<symptoms>")?;
            let age = if age.is_empty() {
                None
            } else {
                Some(age.parse().with_context(|| format!("invalid age {:?}", age))?)
            };
            ShellCommand::Nutrition(NutritionForm {
                age,
                gender: gender.parse()?,
                diet: diet.parse()?,
                symptoms: symptoms.split(',').map(str::to_string).collect(),
            })
        }
        "last" => ShellCommand::LastAnalysis,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => bail!("unknown command {:?}, try 'help'", other),
    };
    Ok(Some(command))
}

fn write_line(out: &Output, line: &str) -> Result<()> {
    let mut out = out.lock().map_err(|e| anyhow!("Output lock poisoned: {}", e))?;
    writeln!(out, "{}", line).context("Failed to write response")?;
    out.flush().context("Failed to flush response")
}

fn emit<T: Serialize>(out: &Output, value: &T) -> Result<()> {
    let json = serde_json::to_string(value).context("Failed to serialize response")?;
    write_line(out, &json)
}

/// Print the command's data, or stay silent when the command was declined.
fn emit_outcome<T: Serialize>(out: &Output, outcome: Result<T, String>) -> Result<()> {
    match outcome {
        Ok(value) => emit(out, &value),
        Err(e) => {
            log::debug!("Command declined: {}", e);
            Ok(())
        }
    }
}

/// Run one command. Returns `false` when the shell should stop.
/// Delayed assistant replies are pushed onto `pending` so the caller can wait for them.
pub fn execute(
    state: &Arc<SessionState>,
    settings: &AppSettings,
    out: &Output,
    pending: &mut Vec<JoinHandle<()>>,
    command: ShellCommand,
) -> Result<bool> {
    match command {
        ShellCommand::Add(form) => emit_outcome(out, medicine::add_medicine(state, form))?,
        ShellCommand::Remove(id) => emit_outcome(out, medicine::remove_medicine(state, id))?,
        ShellCommand::List => emit_outcome(out, medicine::get_medicines(state))?,
        ShellCommand::Schedule => emit_outcome(out, medicine::get_schedule(state))?,
        ShellCommand::Due(hour) => emit_outcome(out, medicine::get_medicines_due(state, hour))?,
        ShellCommand::Say(text) => {
            if let Ok(exchange) = symptoms::submit_symptom_text(state, &text, settings.typing_delay()) {
                emit(out, &exchange.user_turn)?;
                emit(out, &serde_json::json!({ "assistant_typing": true }))?;
                let out = Arc::clone(out);
                pending.push(tokio::spawn(async move {
                    match exchange.reply.await {
                        Ok(Some(turn)) => {
                            if let Err(e) = emit(&out, &turn) {
                                log::error!("{:#}", e);
                            }
                        }
                        Ok(None) => {}
                        Err(e) => log::error!("Assistant reply task failed: {}", e),
                    }
                }));
            }
        }
        ShellCommand::Typing => {
            let typing = symptoms::is_typing(state);
            emit_outcome(out, typing.map(|t| serde_json::json!({ "assistant_typing": t })))?
        }
        ShellCommand::History => emit_outcome(out, symptoms::get_conversation(state))?,
        ShellCommand::Nutrition(form) => emit_outcome(out, nutrition::analyze_nutrition(state, form))?,
        ShellCommand::LastAnalysis => emit_outcome(out, nutrition::get_last_analysis(state))?,
        ShellCommand::Status => emit_outcome(out, system::get_system_status(state))?,
        ShellCommand::Help => write_line(out, HELP)?,
        ShellCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Process lines until EOF or `quit`, then wait for every reply still in flight.
pub async fn run_lines<R>(
    input: R,
    state: Arc<SessionState>,
    settings: AppSettings,
    out: Output,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut pending = Vec::new();

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        match parse_line(&line) {
            Ok(Some(command)) => {
                if !execute(&state, &settings, &out, &mut pending, command)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("Input ignored: {:#}", e),
        }
    }

    for reply in pending {
        if let Err(e) = reply.await {
            log::error!("Assistant reply task failed: {}", e);
        }
    }
    Ok(())
}

/// Read commands from stdin and answer on stdout.
pub async fn run_shell(state: Arc<SessionState>, settings: AppSettings) -> Result<()> {
    let out: Output = Arc::new(Mutex::new(std::io::stdout()));
    write_line(&out, HELP)?;
    run_lines(BufReader::new(tokio::io::stdin()), state, settings, out).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatRole, ChatTurn, Diet, Gender, TimeOfDay};

    /// In-memory `Output` that tests can read back.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn output(&self) -> Output {
            Arc::new(Mutex::new(self.clone()))
        }

        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes).unwrap().lines().map(str::to_string).collect()
        }
    }

    fn settings() -> AppSettings {
        AppSettings { typing_delay_ms: 200 }
    }

    #[test]
    fn parses_add_with_spaces_in_name() {
        let command = parse_line("add Vitamin D3 | 1000 IU | Morning | 30").unwrap().unwrap();
        assert_eq!(
            command,
            ShellCommand::Add(MedicineForm::new("Vitamin D3", "1000 IU", TimeOfDay::Morning, "30"))
        );
    }

    #[test]
    fn add_keeps_blank_fields_for_the_session_to_reject() {
        let command = parse_line("add Aspirin||night|").unwrap().unwrap();
        assert_eq!(
            command,
            ShellCommand::Add(MedicineForm::new("Aspirin", "", TimeOfDay::Night, ""))
        );
    }

    #[test]
    fn add_with_wrong_field_count_fails() {
        assert!(parse_line("add Aspirin|100mg").is_err());
        assert!(parse_line("add Aspirin|100mg|noon|3").is_err());
    }

    #[test]
    fn parses_nutrition_with_optional_age() {
        let command = parse_line("nutrition 45|female|veg|fatigue, dry skin").unwrap().unwrap();
        assert_eq!(
            command,
            ShellCommand::Nutrition(NutritionForm {
                age: Some(45),
                gender: Gender::Female,
                diet: Diet::Vegetarian,
                symptoms: vec!["fatigue".into(), " dry skin".into()],
            })
        );

        match parse_line("nutrition |male|vegan|").unwrap().unwrap() {
            ShellCommand::Nutrition(form) => assert_eq!(form.age, None),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn parses_simple_verbs() {
        assert_eq!(parse_line("  ").unwrap(), None);
        assert_eq!(parse_line("say fever and cough").unwrap(), Some(ShellCommand::Say("fever and cough".into())));
        assert_eq!(parse_line("due 8").unwrap(), Some(ShellCommand::Due(8)));
        assert_eq!(parse_line("last").unwrap(), Some(ShellCommand::LastAnalysis));
        assert_eq!(parse_line("QUIT").unwrap(), Some(ShellCommand::Quit));
        assert!(parse_line("remove not-a-uuid").is_err());
        assert!(parse_line("diagnose me").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn execute_drives_the_session() {
        let state = Arc::new(SessionState::new());
        let captured = Captured::default();
        let out = captured.output();
        let mut pending = Vec::new();

        let add = parse_line("add Aspirin|100mg|morning|5").unwrap().unwrap();
        assert!(execute(&state, &settings(), &out, &mut pending, add).unwrap());
        assert_eq!(medicine::get_medicines(&state).unwrap().medicines.len(), 1);

        let say = parse_line("say stomach pain and nausea").unwrap().unwrap();
        assert!(execute(&state, &settings(), &out, &mut pending, say).unwrap());
        assert!(symptoms::is_typing(&state).unwrap());
        assert_eq!(pending.len(), 1);

        for reply in pending.drain(..) {
            reply.await.unwrap();
        }
        let history = symptoms::get_conversation(&state).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[1].text.contains("Gastroenteritis"));
        assert_eq!(captured.lines().len(), 4);

        assert!(!execute(&state, &settings(), &out, &mut pending, ShellCommand::Quit).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn quit_waits_for_the_pending_reply() {
        let state = Arc::new(SessionState::new());
        let captured = Captured::default();
        let input = "say fever cough headache\nquit\n".as_bytes();

        run_lines(input, Arc::clone(&state), settings(), captured.output()).await.unwrap();

        let history = symptoms::get_conversation(&state).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, ChatRole::Assistant);
        assert!(!symptoms::is_typing(&state).unwrap());

        let lines = captured.lines();
        assert_eq!(lines.len(), 3);
        let reply: ChatTurn = serde_json::from_str(&lines[2]).unwrap();
        assert_eq!(reply, history[1]);
        assert!(reply.text.contains("Common Cold or Flu"));
    }

    #[tokio::test(start_paused = true)]
    async fn end_of_input_waits_for_the_pending_reply() {
        let state = Arc::new(SessionState::new());
        let captured = Captured::default();

        run_lines("say I feel great".as_bytes(), Arc::clone(&state), settings(), captured.output())
            .await
            .unwrap();

        assert_eq!(symptoms::get_conversation(&state).unwrap().len(), 2);
        assert_eq!(captured.lines().len(), 3);
    }

    #[tokio::test]
    async fn rejected_input_prints_nothing() {
        let state = Arc::new(SessionState::new());
        let captured = Captured::default();
        let input = "nutrition abc|male|veg|\n\
                     add A|1|noon|3\n\
                     add A||morning|3\n\
                     nutrition |male|veg|fatigue\n\
                     remove 42\n\
                     say   \n\
                     diagnose me\n";

        run_lines(input.as_bytes(), Arc::clone(&state), settings(), captured.output())
            .await
            .unwrap();

        assert!(captured.lines().is_empty());
        assert!(medicine::get_medicines(&state).unwrap().medicines.is_empty());
        assert!(nutrition::get_last_analysis(&state).unwrap().is_none());
        assert!(symptoms::get_conversation(&state).unwrap().is_empty());
    }
}
