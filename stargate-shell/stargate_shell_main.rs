// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use log::info;
use rustyline::config::EditMode;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor, EventHandler, KeyEvent};
use std::io::{self, IsTerminal};

use stargate_shell::completion::StargateCompletion;
use stargate_shell::config::ShellConfig;
use stargate_shell::error::{ShellError, ShellResult};
use stargate_shell::repl::Repl;
use stargate_shell::repl_handlers::BufReadSource;
use stargate_shell::terminal::{AnsiTerminal, Terminal};
use stargate_shell::{default_registry, editor_helper};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match ShellConfig::try_from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => e.exit(),
    };

    if let Err(e) = run(&config) {
        eprintln!("stargate-shell: {e}");
        std::process::exit(1);
    }
}

fn run(config: &ShellConfig) -> ShellResult<()> {
    let mut terminal = AnsiTerminal::new();
    let registry = default_registry()?;
    terminal.println(&format!("{}: {}", terminal.name(), terminal.kind()))?;

    // Piped input: no editor, no prompts
    if !io::stdin().is_terminal() {
        let mut repl = Repl::new(registry, config);
        let mut source = BufReadSource::new(io::stdin().lock());
        return repl.run(&mut source, &mut terminal);
    }

    let helper = editor_helper(&registry, config);
    let mut rl = create_editor(helper)?;
    let mut repl = Repl::new(registry, config);
    info!("starting interactive session");
    repl.run(&mut rl, &mut terminal)
}

fn create_editor(helper: StargateCompletion) -> ShellResult<Editor<StargateCompletion, DefaultHistory>> {
    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .auto_add_history(true)
        .edit_mode(EditMode::Emacs)
        .build();
    let mut rl = Editor::with_config(rl_config)
        .map_err(|e| ShellError::Startup(format!("cannot create line editor: {e}")))?;
    let toggle = helper.toggle_handler();
    rl.set_helper(Some(helper));
    rl.bind_sequence(KeyEvent::alt('s'), EventHandler::Conditional(Box::new(toggle)));
    Ok(rl)
}
