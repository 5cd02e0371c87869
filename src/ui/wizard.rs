//! Guided journey selection: campaign type, target location, confirmation.
//!
//! The flow is a loop over [`Step`] values. Any step can cancel, which ends
//! the whole flow with nothing selected; `edit` on the summary starts over
//! from the first step with every earlier choice dropped.

use std::io::{self, Write};

use tracing::debug;

use crate::core::catalog::{
    CatalogEntry, CAMPAIGN_TYPES, CONFIRM_ACTIONS, LOCATION_KINDS, NATIONAL_ARCHETYPES, US_STATES,
};
use crate::core::journey::{parse_zip_codes, JourneySelection, LocationSelection};
use crate::ui::prompt::{PromptError, PromptInput, Prompter};

const SELECT_PROMPT: &str = "Select [0]: ";
const ZIP_PROMPT: &str = "ZIP code(s): ";
const STATE_COLUMN_WIDTH: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    Confirmed(JourneySelection),
    Cancelled,
    /// Ctrl+C at a wizard prompt; the caller ends the session.
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListLayout {
    Described,
    TwoColumn,
    Plain,
}

enum Step {
    CampaignType,
    LocationKind {
        campaign: CatalogEntry,
    },
    LocationDetail {
        campaign: CatalogEntry,
        kind: &'static str,
    },
    Confirm(JourneySelection),
}

enum Exit {
    Cancelled,
    Interrupted,
    Failed(PromptError),
}

impl From<PromptError> for Exit {
    fn from(err: PromptError) -> Self {
        Exit::Failed(err)
    }
}

impl From<io::Error> for Exit {
    fn from(err: io::Error) -> Self {
        Exit::Failed(err.into())
    }
}

pub struct JourneyWizard<'a, P: Prompter, W: Write> {
    prompter: &'a mut P,
    out: &'a mut W,
}

/// Run the full confirmation flow.
pub fn confirm_journey_creation<P: Prompter, W: Write>(
    prompter: &mut P,
    out: &mut W,
) -> Result<WizardOutcome, PromptError> {
    JourneyWizard::new(prompter, out).run()
}

impl<'a, P: Prompter, W: Write> JourneyWizard<'a, P, W> {
    pub fn new(prompter: &'a mut P, out: &'a mut W) -> Self {
        Self { prompter, out }
    }

    pub fn run(mut self) -> Result<WizardOutcome, PromptError> {
        match self.drive() {
            Ok(selection) => Ok(WizardOutcome::Confirmed(selection)),
            Err(Exit::Cancelled) => {
                writeln!(self.out, "Journey creation cancelled.")?;
                Ok(WizardOutcome::Cancelled)
            }
            Err(Exit::Interrupted) => Ok(WizardOutcome::Interrupted),
            Err(Exit::Failed(err)) => Err(err),
        }
    }

    fn drive(&mut self) -> Result<JourneySelection, Exit> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "TerryAnn: Let me confirm the details before building your journey."
        )?;

        let mut step = Step::CampaignType;
        loop {
            step = match step {
                Step::CampaignType => {
                    let campaign =
                        self.select("Select Campaign Type", CAMPAIGN_TYPES, ListLayout::Described)?;
                    debug!(campaign = campaign.id, "campaign type selected");
                    Step::LocationKind { campaign }
                }
                Step::LocationKind { campaign } => {
                    let kind = self.select(
                        "Select Target Location Type",
                        LOCATION_KINDS,
                        ListLayout::Described,
                    )?;
                    Step::LocationDetail {
                        campaign,
                        kind: kind.id,
                    }
                }
                Step::LocationDetail { campaign, kind } => {
                    let location = self.select_location(kind)?;
                    debug!(kind, label = location.label(), "location selected");
                    Step::Confirm(JourneySelection { campaign, location })
                }
                Step::Confirm(selection) => {
                    self.render_summary(&selection)?;
                    let action = self.select("", CONFIRM_ACTIONS, ListLayout::Plain)?;
                    match action.id {
                        "create" => return Ok(selection),
                        _ => {
                            debug!("restarting journey selection");
                            Step::CampaignType
                        }
                    }
                }
            };
        }
    }

    fn select_location(&mut self, kind: &str) -> Result<LocationSelection, Exit> {
        match kind {
            "zip" => self.collect_zip_codes(),
            "state" => {
                let state = self.select("Select State", US_STATES, ListLayout::TwoColumn)?;
                Ok(LocationSelection::state(&state))
            }
            "archetype" => {
                let archetype = self.select(
                    "Select National Archetype",
                    NATIONAL_ARCHETYPES,
                    ListLayout::Described,
                )?;
                Ok(LocationSelection::archetype(&archetype))
            }
            _ => Err(Exit::Cancelled),
        }
    }

    fn read(&mut self, prompt: &str) -> Result<String, Exit> {
        self.out.flush()?;
        match self.prompter.read_line(prompt, None)? {
            PromptInput::Line(line) => Ok(line),
            PromptInput::EndOfInput => Err(Exit::Cancelled),
            PromptInput::Interrupted => Err(Exit::Interrupted),
        }
    }

    fn select(
        &mut self,
        title: &str,
        options: &'static [CatalogEntry],
        layout: ListLayout,
    ) -> Result<CatalogEntry, Exit> {
        self.render_list(title, options, layout)?;

        loop {
            let input = self.read(SELECT_PROMPT)?;
            let trimmed = input.trim();
            let choice = if trimmed.is_empty() {
                0
            } else {
                match trimmed.parse::<usize>() {
                    Ok(choice) => choice,
                    Err(_) => {
                        writeln!(self.out, "Please enter a number.")?;
                        return Err(Exit::Cancelled);
                    }
                }
            };

            match choice {
                0 => return Err(Exit::Cancelled),
                n if n <= options.len() => return Ok(options[n - 1]),
                _ => writeln!(self.out, "Invalid selection. Try again.")?,
            }
        }
    }

    fn render_list(
        &mut self,
        title: &str,
        options: &[CatalogEntry],
        layout: ListLayout,
    ) -> io::Result<()> {
        writeln!(self.out)?;
        if !title.is_empty() {
            writeln!(self.out, "{title}")?;
            writeln!(self.out)?;
        }

        match layout {
            ListLayout::TwoColumn => {
                let half = options.len().div_ceil(2);
                for i in 0..half {
                    let left = format!("{:>3}. {}", i + 1, options[i].label);
                    match options.get(i + half) {
                        Some(right) => writeln!(
                            self.out,
                            "  {left:<width$}{:>3}. {}",
                            i + half + 1,
                            right.label,
                            width = STATE_COLUMN_WIDTH
                        )?,
                        None => writeln!(self.out, "  {left}")?,
                    }
                }
            }
            ListLayout::Described | ListLayout::Plain => {
                for (i, option) in options.iter().enumerate() {
                    match (layout, option.description) {
                        (ListLayout::Described, Some(description)) => writeln!(
                            self.out,
                            "  {}. {} - {}",
                            i + 1,
                            option.label,
                            description
                        )?,
                        _ => writeln!(self.out, "  {}. {}", i + 1, option.label)?,
                    }
                }
            }
        }

        writeln!(self.out)?;
        writeln!(self.out, "  0. Cancel")?;
        writeln!(self.out)
    }

    fn collect_zip_codes(&mut self) -> Result<LocationSelection, Exit> {
        writeln!(self.out)?;
        writeln!(self.out, "Enter ZIP Code(s)")?;
        writeln!(
            self.out,
            "Separate multiple ZIPs with commas (e.g., 10023, 10024, 10025)"
        )?;
        writeln!(self.out)?;

        let input = self.read(ZIP_PROMPT)?;
        if input.trim().is_empty() {
            return Err(Exit::Cancelled);
        }

        let parsed = parse_zip_codes(&input);
        for rejected in &parsed.rejected {
            writeln!(self.out, "{rejected}")?;
        }

        match LocationSelection::zip(parsed.valid) {
            Some(location) => Ok(location),
            None => {
                writeln!(self.out, "No valid ZIP codes entered.")?;
                Err(Exit::Cancelled)
            }
        }
    }

    fn render_summary(&mut self, selection: &JourneySelection) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Confirm Journey")?;
        writeln!(self.out, "  Campaign  {}", selection.campaign.label)?;
        writeln!(self.out, "  Target    {}", selection.location.label())
    }
}
