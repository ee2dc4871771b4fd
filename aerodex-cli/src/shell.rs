//! # Interactive Menu
//!
//! Single-letter commands read line by line. End of input behaves like `Q`.
//! The shell only talks to [`Catalog`]; both indexes stay behind it.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, warn};

use aerodex_core::{Code, Error, Record};
use aerodex_storage::Catalog;

use crate::render;

const MENU: &str = "\
Enter 'A' to add new data
      'D' to delete data
      'F' to find data
      'L' to list data in hash table sequence
      'K' to list data in key sequence
      'P' to print the tree
      'W' to write data to a file
      'E' to calculate efficiency
      'Q' to quit";

/// Menu loop over a catalog
pub struct Shell<'a, R, W> {
    catalog: &'a mut Catalog,
    input: R,
    out: W,
    output_file: PathBuf,
    save_on_exit: bool,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(catalog: &'a mut Catalog, input: R, out: W) -> Self {
        Self {
            catalog,
            input,
            out,
            output_file: PathBuf::from("outputFile.txt"),
            save_on_exit: false,
        }
    }

    /// Where `W` writes, and whether quitting saves there too
    pub fn with_output(mut self, output_file: PathBuf, save_on_exit: bool) -> Self {
        self.output_file = output_file;
        self.save_on_exit = save_on_exit;
        self
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "\n{}", MENU)?;
            let Some(choice) = self.prompt("Choice: ")? else {
                break;
            };
            let command = choice.chars().next().map(|c| c.to_ascii_uppercase());
            debug!("Menu command {:?}", command);

            match command {
                Some('A') => self.add()?,
                Some('D') => self.delete()?,
                Some('F') => self.find()?,
                Some('L') => render::hash_order(&mut self.out, self.catalog)?,
                Some('K') => render::key_order(&mut self.out, self.catalog)?,
                Some('P') => {
                    render::tree(&mut self.out, self.catalog)?;
                    writeln!(self.out)?;
                }
                Some('W') => self.write()?,
                Some('E') => {
                    writeln!(self.out)?;
                    render::report(&mut self.out, &self.catalog.load_report())?;
                }
                Some('H') => self.resize_demo()?,
                Some('Q') => break,
                _ => writeln!(self.out, "Invalid choice. Choose again")?,
            }
        }

        if self.save_on_exit {
            writeln!(self.out, "\nSaving data ...")?;
            match self.catalog.save(&self.output_file) {
                Ok(_) => writeln!(self.out, "Successfully saved")?,
                Err(e) => {
                    warn!("Save on exit failed: {}", e);
                    writeln!(self.out, "Could not save to file.")?;
                }
            }
        }
        Ok(())
    }

    /// Print `label` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_code(&mut self) -> Result<Option<Code>> {
        let Some(text) = self.prompt("Enter the airport code: ")? else {
            return Ok(None);
        };
        match Code::new(&text) {
            Ok(code) => Ok(Some(code)),
            Err(Error::InvalidCode { reason, .. }) => {
                writeln!(self.out, "Your airport code has to have 3 letters ({})", reason)?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Re-prompt until the line parses as a number
    fn prompt_coordinate(&mut self, name: &str) -> Result<Option<f64>> {
        let mut label = format!("Enter airport {}: ", name);
        loop {
            let Some(text) = self.prompt(&label)? else {
                return Ok(None);
            };
            if let Ok(value) = text.parse::<f64>() {
                return Ok(Some(value));
            }
            label = format!("Invalid input, please try entering the {} again: ", name);
        }
    }

    fn add(&mut self) -> Result<()> {
        let Some(code) = self.prompt_code()? else {
            return Ok(());
        };
        if let Some(existing) = self.catalog.find(&code) {
            writeln!(self.out, "This airport already exists")?;
            writeln!(self.out, "{}", existing)?;
            return Ok(());
        }

        let city = match self.prompt("Enter airport city: ")? {
            Some(city) if !city.is_empty() => city,
            _ => {
                writeln!(self.out, "A city name is required")?;
                return Ok(());
            }
        };
        let Some(latitude) = self.prompt_coordinate("latitude")? else {
            return Ok(());
        };
        let Some(longitude) = self.prompt_coordinate("longitude")? else {
            return Ok(());
        };

        self.catalog.add(Record::new(code, city, latitude, longitude))?;
        writeln!(self.out, "\n Successfully added data.\n")?;
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let Some(code) = self.prompt_code()? else {
            return Ok(());
        };
        match self.catalog.delete(&code) {
            Ok(_) => writeln!(self.out, "\n Successfully deleted data.\n")?,
            Err(Error::NotFound { .. }) => writeln!(self.out, "No airport exists")?,
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn find(&mut self) -> Result<()> {
        let Some(code) = self.prompt_code()? else {
            return Ok(());
        };
        match self.catalog.find(&code) {
            Some(record) => writeln!(self.out, "{}", record)?,
            None => writeln!(self.out, "No airport exists")?,
        }
        Ok(())
    }

    fn write(&mut self) -> Result<()> {
        match self.catalog.save(&self.output_file) {
            Ok(n) => writeln!(self.out, "Wrote {} records to {}", n, self.output_file.display())?,
            Err(e) => writeln!(self.out, "Could not save to file: {}", e)?,
        }
        Ok(())
    }

    /// Manual grow/shrink, independent of the load factor
    fn resize_demo(&mut self) -> Result<()> {
        let Some(answer) = self.prompt(
            "Type 'I' to increase the size of the hash or 'D' to decrease the size of the hash: ",
        )?
        else {
            return Ok(());
        };
        match answer.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('I') => {
                self.catalog.grow_table()?;
            }
            Some('D') => {
                if !self.catalog.shrink_table()? {
                    writeln!(self.out, "The hash is already at its minimum size.")?;
                }
            }
            _ => {
                writeln!(self.out, "Invalid command, nothing was changed.")?;
                return Ok(());
            }
        }
        writeln!(
            self.out,
            "The hash now has {} buckets.",
            self.catalog.load_report().array_size
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let records = vec![
            Record::new(Code::new("SFO").unwrap(), "San Francisco", 37.62, -122.38),
            Record::new(Code::new("LAX").unwrap(), "Los Angeles", 33.94, -118.41),
        ];
        Catalog::load(records).unwrap()
    }

    fn run(catalog: &mut Catalog, script: &str) -> String {
        let mut out = Vec::new();
        Shell::new(catalog, script.as_bytes(), &mut out).run().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_then_find() {
        let mut catalog = catalog();
        let out = run(&mut catalog, "a\njfk\nNew York\nnorth\n40.64\n-73.78\nf\nJFK\nq\n");
        assert!(out.contains("Invalid input, please try entering the latitude again"));
        assert!(out.contains("Successfully added data"));
        assert_eq!(catalog.len(), 3);
        let jfk = catalog.retrieve(&Code::new("JFK").unwrap()).unwrap();
        assert_eq!(jfk.city(), "New York");
        assert_eq!(jfk.latitude(), 40.64);
    }

    #[test]
    fn test_add_existing_is_refused() {
        let mut catalog = catalog();
        let out = run(&mut catalog, "A\nsfo\nQ\n");
        assert!(out.contains("This airport already exists"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_add_bad_code() {
        let mut catalog = catalog();
        let out = run(&mut catalog, "A\nSFOO\nQ\n");
        assert!(out.contains("Your airport code has to have 3 letters"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_delete_and_missing() {
        let mut catalog = catalog();
        let out = run(&mut catalog, "D\nLAX\nD\nLAX\nQ\n");
        assert!(out.contains("Successfully deleted data"));
        assert!(out.contains("No airport exists"));
        assert_eq!(catalog.len(), 1);
        catalog.verify().unwrap();
    }

    #[test]
    fn test_key_listing_and_invalid_choice() {
        let mut catalog = catalog();
        let out = run(&mut catalog, "K\nX\nQ\n");
        let lax = out.find("LAX Los Angeles").unwrap();
        let sfo = out.find("SFO San Francisco").unwrap();
        assert!(lax < sfo);
        assert!(out.contains("Invalid choice. Choose again"));
    }

    #[test]
    fn test_resize_demo() {
        let mut catalog = catalog();
        let before = catalog.hashed().capacity();
        run(&mut catalog, "H\nI\nQ\n");
        assert_eq!(catalog.hashed().capacity(), before * 2);
        let out = run(&mut catalog, "H\nz\nQ\n");
        assert!(out.contains("nothing was changed"));
        assert_eq!(catalog.hashed().capacity(), before * 2);
    }

    #[test]
    fn test_end_of_input_quits_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut catalog = catalog();
        let mut out = Vec::new();
        Shell::new(&mut catalog, "E\n".as_bytes(), &mut out)
            .with_output(path.clone(), true)
            .run()
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("The total size of hash is 4."));
        assert!(text.contains("Successfully saved"));
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
    }
}
