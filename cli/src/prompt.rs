//! Interactive prompting: the top-level menu, build questions and recovery.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use catalog::{
    run_build, BuildOutcome, BuildRequest, CorrectionSource, Correction, RecognitionPipeline,
    ReportHeader, Unresolved, CANCEL_TOKEN,
};
use tracing::error;

use crate::{read_image_list, CliError};

const BANNER_RULE: &str = "=========================================================================================================================";
const END_TOKEN: &str = "end";

/// Line-oriented question and answer over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line of text for the operator
    pub fn say(&mut self, text: &str) -> Result<(), CliError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Read one line without its line ending, or `None` at end of input
    fn read_line(&mut self, question: &str) -> Result<Option<String>, CliError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask a question. Answering `quit`, or closing the input, yields
    /// [`CliError::Quit`].
    pub fn ask(&mut self, question: &str) -> Result<String, CliError> {
        match self.read_line(question)? {
            Some(answer) if answer != CANCEL_TOKEN => Ok(answer),
            _ => Err(CliError::Quit),
        }
    }

    /// Collect image paths typed one at a time until `end`
    pub fn ask_image_paths(&mut self) -> Result<Vec<PathBuf>, CliError> {
        self.say("Type in the image file path or type 'quit' to quit. When finished inputting file names, type 'end.'")?;

        let mut images = Vec::new();
        loop {
            let image = self.ask("Input image file name: ")?;
            if image == END_TOKEN {
                return Ok(images);
            }
            images.push(PathBuf::from(image));
        }
    }

    /// Ask how image paths will be supplied and collect them
    pub fn ask_images(&mut self) -> Result<Vec<PathBuf>, CliError> {
        loop {
            let method = self.ask(
                "Would you like to input image file paths 'manually,' via 'text document,' or 'quit' to quit the program? \
                 If you input image file names via text document, \n make sure that each image file name is on it's own line: ",
            )?;

            if method.contains("manual") {
                return self.ask_image_paths();
            }
            if method.contains("text") {
                let list = self.ask("Input file path with image file paths or 'quit' to quit the program: ")?;
                return read_image_list(list);
            }
        }
    }

    /// Gather everything needed for a deck build
    pub fn ask_deck(&mut self) -> Result<BuildRequest, CliError> {
        let name = self.ask("Input name of deck or 'quit' to quit the program: ")?;
        let summary = self.ask("Input deck summary or 'quit' to quit the program: ")?;
        let format = self.ask("Input deck format or 'quit' to quit the program: ")?;
        let output = self.ask("Input name of file to save the deck to or 'quit' to quit the program: ")?;
        let images = self.ask_images()?;

        Ok(BuildRequest {
            header: ReportHeader::Deck { name, summary, format },
            images,
            output: PathBuf::from(output),
        })
    }

    /// Gather everything needed for a collection build
    pub fn ask_collection(&mut self) -> Result<BuildRequest, CliError> {
        let name = self.ask("Input name of collection or 'quit' to quit the program: ")?;
        let summary = self.ask("Input collection summary or 'quit' to quit the program: ")?;
        let output = self.ask("Input name of file to save the collection to or 'quit' to quit the program: ")?;
        let images = self.ask_images()?;

        Ok(BuildRequest {
            header: ReportHeader::Collection { name, summary },
            images,
            output: PathBuf::from(output),
        })
    }

    /// Run one build, reporting progress and outcome to the operator
    pub fn build(
        &mut self,
        pipeline: &RecognitionPipeline,
        request: &BuildRequest,
    ) -> Result<BuildOutcome, CliError> {
        let kind = request.header.kind();
        self.say("=============================================================================================")?;
        self.say(&format!("{kind} creation started! An error message will be printed if an image file cannot be processed."))?;

        let outcome = run_build(pipeline, request, self)?;

        self.say("======================================================================")?;
        match &outcome {
            BuildOutcome::Completed(summary) => {
                self.say(&format!("{kind} creation finished! Check {}", summary.output.display()))?;
            }
            BuildOutcome::Cancelled { processed } => {
                self.say(&format!(
                    "{kind} creation cancelled after {processed} card(s). {} contains no cards.",
                    request.output.display()
                ))?;
            }
        }
        self.say("======================================================================")?;
        Ok(outcome)
    }

    /// The top-level `collection | deck | quit` loop.
    ///
    /// `quit` at any question ends the loop; `quit` while correcting a card
    /// only cancels that build. A failed build or an unreadable image list is
    /// reported and the menu shown again.
    pub fn run_menu(&mut self, pipeline: &RecognitionPipeline) -> Result<(), CliError> {
        self.say(BANNER_RULE)?;
        self.say("Welcome to the MTG Cataloger! You may type 'quit' at any time to quit the program.")?;
        self.say("Options for prompts are contained within apostraphes (e.g. 'example'). Type these as responses to prompts to run program.")?;
        self.say(BANNER_RULE)?;

        loop {
            match self.menu_round(pipeline) {
                Ok(()) => {}
                Err(CliError::Quit) => return Ok(()),
                Err(CliError::CatalogError(e)) => {
                    error!("Build failed: {}", e);
                    self.say(&format!("Build failed: {e}"))?;
                }
                Err(e @ CliError::ImageList { .. }) => {
                    error!("{}", e);
                    self.say(&e.to_string())?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn menu_round(&mut self, pipeline: &RecognitionPipeline) -> Result<(), CliError> {
        let request = match self.ask("Would you like to create a 'collection', 'deck', or 'quit'?: ")?.as_str() {
            "deck" => self.ask_deck()?,
            "collection" => self.ask_collection()?,
            _ => return Ok(()),
        };
        self.build(pipeline, &request)?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> CorrectionSource for Prompter<R, W> {
    fn request_correction(&mut self, pending: &Unresolved) -> catalog::Result<Correction> {
        let to_catalog = |e: CliError| match e {
            CliError::IoError(e) => catalog::CatalogError::Io(e),
            other => catalog::CatalogError::Io(std::io::Error::other(other.to_string())),
        };

        self.say(&format!(
            "Error processing card in file \"{}\". Program read \"{}\" as name of card.",
            pending.image_path.display(),
            pending.raw_text.trim()
        ))
        .map_err(to_catalog)?;

        let answer = self
            .read_line("Please enter the name of the card that was unable to be processed (ensure that spelling and punctuation are correct): ")
            .map_err(to_catalog)?;

        Ok(answer.map_or(Correction::Cancel, |answer| Correction::from_input(&answer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, io::Cursor, path::Path};

    use catalog::{CardRecord, ImageNormalizer, InMemoryDatabase, TextRecognizer, CARD_HEIGHT, CARD_WIDTH};
    use image::{Rgb, RgbImage};

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    struct BlankCard;

    impl ImageNormalizer for BlankCard {
        fn normalize(&self, _path: &Path) -> catalog::Result<RgbImage> {
            Ok(RgbImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, Rgb([255u8, 255, 255])))
        }
    }

    /// Reads every card as the same text
    struct FixedText(&'static str);

    impl TextRecognizer for FixedText {
        fn recognize_text(&self, _image: &RgbImage) -> catalog::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn pipeline(text: &'static str) -> RecognitionPipeline {
        let island = CardRecord {
            name: "Island".to_string(),
            mana_cost: String::new(),
            converted_mana_cost: 0.0,
            type_line: "Basic Land - Island".to_string(),
            colors: None,
            color_identity: None,
            power: None,
            toughness: None,
            loyalty: None,
        };

        RecognitionPipeline::builder()
            .set_normalizer(BlankCard)
            .set_recognizer(FixedText(text))
            .set_database(InMemoryDatabase::new(vec![island]))
            .build()
            .expect("Should build pipeline")
    }

    #[test]
    fn test_ask_and_quit() {
        let mut prompter = prompter("Mono Blue\r\nquit\n");
        assert_eq!(prompter.ask("Name: ").expect("answer"), "Mono Blue");
        assert!(matches!(prompter.ask("Summary: "), Err(CliError::Quit)));
        assert!(matches!(prompter.ask("Format: "), Err(CliError::Quit)));

        let output = String::from_utf8(prompter.into_output()).expect("utf8");
        assert_eq!(output, "Name: Summary: Format: ");
    }

    #[test]
    fn test_manual_image_entry() {
        let mut prompter = prompter("manually\na.jpg\nb.jpg\nend\n");
        let images = prompter.ask_images().expect("Should collect images");
        assert_eq!(images, vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")]);
    }

    #[test]
    fn test_image_entry_from_text_document() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let list = dir.path().join("images.txt");
        fs::write(&list, "one.jpg\ntwo.jpg\n").expect("Should write list");

        let mut prompter = prompter(&format!("neither\ntext document\n{}\n", list.display()));
        let images = prompter.ask_images().expect("Should read list");
        assert_eq!(images, vec![PathBuf::from("one.jpg"), PathBuf::from("two.jpg")]);
    }

    #[test]
    fn test_menu_survives_missing_image_list() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let output = dir.path().join("deck.txt");
        let list = dir.path().join("nowhere.txt");
        let script = format!(
            "deck\nIslands\nAll blue\nCasual\n{}\ntext document\n{}\nquit\n",
            output.display(),
            list.display()
        );

        let mut prompter = prompter(&script);
        prompter.run_menu(&pipeline("Island")).expect("Menu should exit cleanly");
        assert!(!output.exists());

        let transcript = String::from_utf8(prompter.into_output()).expect("utf8");
        assert!(transcript.contains(&format!("Cannot read image list {}", list.display())));
        assert_eq!(transcript.matches("Would you like to create a 'collection', 'deck', or 'quit'?: ").count(), 2);
    }

    #[test]
    fn test_ask_deck() {
        let mut prompter = prompter("Burn\nFast\nModern\nburn.txt\nmanual\nbolt.jpg\nend\n");
        let request = prompter.ask_deck().expect("Should gather deck");

        assert_eq!(request.header, ReportHeader::Deck {
            name: "Burn".to_string(),
            summary: "Fast".to_string(),
            format: "Modern".to_string(),
        });
        assert_eq!(request.output, PathBuf::from("burn.txt"));
        assert_eq!(request.images, vec![PathBuf::from("bolt.jpg")]);
    }

    #[test]
    fn test_quit_while_listing_images() {
        let mut prompter = prompter("Binder\nStuff\nbinder.txt\nmanual\na.jpg\nquit\n");
        assert!(matches!(prompter.ask_collection(), Err(CliError::Quit)));
    }

    #[test]
    fn test_correction_prompt() {
        let pending = Unresolved {
            image_path: PathBuf::from("card.jpg"),
            raw_text: "Isl@nd\n".to_string(),
            attempted: "Islnd".to_string(),
        };

        let mut prompter = prompter("Island\nquit\n");
        assert_eq!(prompter.request_correction(&pending).expect("answer"), Correction::Name("Island".to_string()));
        assert_eq!(prompter.request_correction(&pending).expect("answer"), Correction::Cancel);
        assert_eq!(prompter.request_correction(&pending).expect("answer"), Correction::Cancel);

        let output = String::from_utf8(prompter.into_output()).expect("utf8");
        assert!(output.contains("Error processing card in file \"card.jpg\". Program read \"Isl@nd\" as name of card."));
    }

    #[test]
    fn test_menu_builds_deck_with_correction() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let output = dir.path().join("deck.txt");
        let script = format!(
            "deck\nIslands\nAll blue\nCasual\n{}\nmanually\nisland.jpg\nend\nIsland\nquit\n",
            output.display()
        );

        let mut prompter = prompter(&script);
        prompter.run_menu(&pipeline("Islnad")).expect("Menu should exit cleanly");

        let report = fs::read_to_string(&output).expect("Should write report");
        assert!(report.contains("Deck Name: Islands\n"));
        assert!(report.contains("Card Name: \"Island\", Type: Basic Land - Island, Color Identity(s): None\n"));
        assert!(report.contains("Total Lands: 1\n"));

        let transcript = String::from_utf8(prompter.into_output()).expect("utf8");
        assert!(transcript.contains("Deck creation finished!"));
    }

    #[test]
    fn test_menu_recovery_quit_cancels_build_only() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let output = dir.path().join("binder.txt");
        let script = format!(
            "collection\nBinder\nTrades\n{}\nmanually\nfirst.jpg\nsecond.jpg\nend\nquit\nquit\n",
            output.display()
        );

        let mut prompter = prompter(&script);
        prompter.run_menu(&pipeline("Blur")).expect("Menu should exit cleanly");

        let report = fs::read_to_string(&output).expect("Output file should exist");
        assert!(report.starts_with("=============================\nCollection Information\n"));
        assert!(!report.contains("Card Name"));

        let transcript = String::from_utf8(prompter.into_output()).expect("utf8");
        assert!(transcript.contains("Collection creation cancelled after 0 card(s)."));
        // Back at the menu after the cancelled build
        assert_eq!(transcript.matches("Would you like to create a 'collection', 'deck', or 'quit'?: ").count(), 2);
    }
}
