//! One run of the shell against a preference store.
//!
//! Opening a session loads the saved sky and starts watching the fullness signal;
//! closing it saves the sky back.

use crate::cli::SkyCommand;
use parking_lot::Mutex;
use sky_kernel::domain::StarSize;
use sky_registry::{RegistryError, SkyRegistry};
use sky_signal::Observer;
use sky_storage::PreferenceStore;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

pub(crate) const FULL_NOTICE: &str = "The sky is full!";

type SharedOut<W> = Arc<Mutex<W>>;

pub(crate) struct Session<S, W> {
    registry: SkyRegistry,
    store: S,
    out: SharedOut<W>,
    _full_observer: Observer<bool>,
}

impl<S, W> Session<S, W>
where
    S: PreferenceStore,
    W: Write + Send + 'static,
{
    /// Loads the saved sky into `registry` and starts reporting a full sky on `out`.
    ///
    /// Each notice flips the signal back to `false`, so the next rejected add notifies
    /// again.
    pub(crate) async fn open(mut registry: SkyRegistry, store: S, out: W) -> Self {
        registry.load(&store).await;

        let out = Arc::new(Mutex::new(out));
        let signal = registry.is_full().clone();
        let sink = Arc::clone(&out);
        let full_observer = registry.is_full().observe(move |full| {
            if *full {
                if let Err(e) = writeln!(sink.lock(), "{FULL_NOTICE}") {
                    warn!(error = %e, "Failed to print the full sky notice");
                }
                signal.set(false);
            }
        });

        info!(stars = registry.len(), "Session opened");
        Self { registry, store, out, _full_observer: full_observer }
    }

    pub(crate) fn execute(&mut self, command: SkyCommand) -> io::Result<()> {
        match command {
            SkyCommand::Small { count } => self.add(StarSize::Small, count),
            SkyCommand::Big { count } => self.add(StarSize::Big, count),
            SkyCommand::Reset => self.registry.reset_star(),
            SkyCommand::Show => self.show()?,
            SkyCommand::Interactive => debug!("Interactive mode is driven by `interact`"),
        }
        Ok(())
    }

    /// Runs line commands until `q` or end of input.
    pub(crate) async fn interact<R>(&mut self, input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let command = match line.trim() {
                "" => continue,
                "q" | "quit" => break,
                "s" => SkyCommand::Small { count: 1 },
                "b" => SkyCommand::Big { count: 1 },
                "r" => SkyCommand::Reset,
                "show" => SkyCommand::Show,
                other => {
                    writeln!(self.out.lock(), "Unknown command '{other}' (s, b, r, show, q)")?;
                    continue;
                },
            };
            self.execute(command)?;
        }
        Ok(())
    }

    /// Saves the sky and hands back the registry.
    pub(crate) async fn close(self) -> Result<SkyRegistry, RegistryError> {
        self.registry.save(&self.store).await?;
        Ok(self.registry)
    }

    fn add(&mut self, size: StarSize, count: usize) {
        for _ in 0..count {
            self.registry.add_star(size);
        }
    }

    fn show(&self) -> io::Result<()> {
        let summary = self.registry.summary();
        let mut out = self.out.lock();
        writeln!(out, "Stars: {summary}")?;
        writeln!(out, "Bright Stars: {}", summary.bright_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sky_registry::{MAX_STARS, SAVED_STARS};
    use sky_storage::MemoryPreferences;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    #[tokio::test]
    async fn test_full_sky_notifies_and_resets_signal() {
        let out = Captured::default();
        let mut session =
            Session::open(SkyRegistry::seeded(1), MemoryPreferences::new(), out.clone()).await;

        session.execute(SkyCommand::Big { count: MAX_STARS + 1 }).unwrap();

        assert_eq!(out.text().matches(FULL_NOTICE).count(), 2);
        assert!(!session.registry.is_full().get());
        assert_eq!(session.registry.len(), MAX_STARS);
    }

    #[derive(Debug)]
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unprintable_notice_still_resets_signal() {
        let mut session =
            Session::open(SkyRegistry::seeded(6), MemoryPreferences::new(), Broken).await;

        session.execute(SkyCommand::Small { count: MAX_STARS + 2 }).unwrap();

        assert!(!session.registry.is_full().get());
        assert_eq!(session.registry.len(), MAX_STARS);
    }

    #[tokio::test]
    async fn test_close_saves_and_open_restores() {
        let prefs = MemoryPreferences::new();
        let mut session =
            Session::open(SkyRegistry::seeded(2), prefs.clone(), io::sink()).await;
        session.execute(SkyCommand::Small { count: 3 }).unwrap();
        let saved = session.close().await.unwrap();

        assert!(prefs.contains(SAVED_STARS).await.unwrap());

        let reopened = Session::open(SkyRegistry::seeded(3), prefs, io::sink()).await;
        assert_eq!(reopened.registry.stars(), saved.stars());
    }

    #[tokio::test]
    async fn test_interactive_commands() {
        let out = Captured::default();
        let mut session =
            Session::open(SkyRegistry::seeded(4), MemoryPreferences::new(), out.clone()).await;

        let script: &[u8] = b"s\nb\n\nbogus\nshow\nr\nshow\nq\ns\n";
        session.interact(script).await.unwrap();

        let text = out.text();
        assert!(text.contains("Unknown command 'bogus'"));
        assert!(text.contains("Stars: Star(Size: S"));
        assert!(text.contains("Stars: List is empty."));
        assert!(session.registry.is_empty(), "input after `q` is ignored");
    }

    #[tokio::test]
    async fn test_show_counts_bright_stars() {
        let out = Captured::default();
        let mut session =
            Session::open(SkyRegistry::seeded(5), MemoryPreferences::new(), out.clone()).await;
        session.registry.add_star(StarSize::Big);
        session.execute(SkyCommand::Show).unwrap();

        let bright = session.registry.bright_count();
        assert!(out.text().contains(&format!("Bright Stars: {bright}")));
    }
}
