use crate::settings::EngineSettings;
use crate::tui::{inputs::{map_event, Action}, views::{self, Progress, RightPane}};
use crossterm::{
    event::{self},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lexicard_core::{apply_judgment, BucketEngine, Card, Deck, Judgment, Repository, SessionScore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::warn;

struct Practice {
    deck: String,
    engine: BucketEngine,
    card: Option<Card>,
    reveal: bool,
    flagged: bool,
    answered_wrong: bool,
    score: SessionScore,
}

impl Practice {
    fn next(&mut self) {
        self.card = self.engine.pick_next().ok();
        self.reveal = false;
        self.flagged = false;
        self.answered_wrong = false;
    }
}

pub struct TuiApp {
    pub repo: Arc<dyn Repository>,
    pub rt: Arc<Runtime>,
    settings: EngineSettings,
    decks: Vec<Deck>,
    sel: usize,
    practice: Option<Practice>,
}

impl TuiApp {
    pub fn new(repo: Arc<dyn Repository>, rt: Arc<Runtime>, settings: EngineSettings) -> Self {
        Self { repo, rt, settings, decks: vec![], sel: 0, practice: None }
    }

    fn load_decks(&mut self) {
        let mut v = self.rt.block_on(self.repo.list_decks()).unwrap_or_default();
        v.sort_by(|a, b| a.name.cmp(&b.name));
        self.decks = v;
        self.sel = self.sel.min(self.decks.len().saturating_sub(1));
    }

    fn start_practice(&mut self) {
        let Some(deck) = self.decks.get(self.sel) else { return };
        let mut engine = self.settings.build(deck.cards.clone());
        let card = engine.get_current_card().ok();
        self.practice = Some(Practice {
            deck: deck.name.clone(),
            engine,
            card,
            reveal: false,
            flagged: false,
            answered_wrong: false,
            score: SessionScore::default(),
        });
    }

    fn judge(&mut self, action: Action) {
        let Some(p) = self.practice.as_mut() else { return };
        let Some(id) = p.card.as_ref().map(|c| c.id) else { return };
        if p.answered_wrong {
            // the answer is on screen after a miss; any answer key moves on
            p.next();
            return;
        }
        let judgment = match action {
            // answering without revealing counts as confident
            Action::Correct => Judgment::Correct { confident: !p.reveal },
            Action::Wrong => Judgment::Incorrect,
            _ => Judgment::Skip,
        };
        apply_judgment(&mut p.engine, id, judgment);
        p.score.record(&judgment);
        if judgment == Judgment::Incorrect && !p.reveal {
            p.reveal = true;
            p.answered_wrong = true;
        } else {
            p.next();
        }
    }

    fn flag_current(&mut self) {
        let Some(p) = self.practice.as_mut() else { return };
        let Some(card) = &p.card else { return };
        if let Err(e) = self.rt.block_on(self.repo.set_correction_flag(&p.deck, card.id, true)) {
            warn!(error = %e, card = card.id, "could not flag card");
        } else {
            p.flagged = true;
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.load_decks();

        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.mainloop(&mut terminal);

        disable_raw_mode().ok();
        let mut out: Stdout = std::io::stdout();
        execute!(out, LeaveAlternateScreen).ok();
        terminal.show_cursor().ok();

        res
    }

    fn mainloop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| {
                let (right, progress) = match &self.practice {
                    Some(p) => {
                        let right = match &p.card {
                            Some(card) => RightPane::Card { card, reveal: p.reveal, flagged: p.flagged },
                            None => RightPane::Empty("This deck has no cards."),
                        };
                        (right, Some(Progress { sizes: p.engine.sizes(), score: &p.score }))
                    }
                    None => (RightPane::Idle, None),
                };
                views::draw_ui(f, f.size(), &self.decks, self.sel, right, progress);
            })?;

            if event::poll(std::time::Duration::from_millis(100))? {
                let ev = event::read()?;
                let action = map_event(ev);
                let in_practice = self.practice.is_some();
                match action {
                    Action::Quit => break,
                    Action::Back => { if in_practice { self.practice = None; } else { break; } }
                    Action::Up   => { if !in_practice { self.sel = self.sel.saturating_sub(1); } }
                    Action::Down => { if !in_practice && self.sel + 1 < self.decks.len() { self.sel += 1; } }
                    Action::Enter => { if !in_practice { self.start_practice(); } }
                    Action::ToggleReveal => {
                        if let Some(p) = self.practice.as_mut() { p.reveal = !p.reveal; }
                    }
                    Action::Correct | Action::Wrong | Action::Skip => self.judge(action),
                    Action::Flag => self.flag_current(),
                    Action::None => {}
                }
            }
        }
        Ok(())
    }
}
