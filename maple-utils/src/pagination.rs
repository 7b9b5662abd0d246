use async_trait::async_trait;

/// Page size used for every ordered collection listing request. Display
/// ranks are derived from the same constant, so the two must not drift.
pub const PAGE_SIZE: usize = 10;

/// Idle window after which a navigator's message controls are removed.
pub const NAVIGATION_TIMEOUT_SECS: u64 = 60 * 5;

/// One fetched page of a remote ordered collection.
#[derive(Clone, Debug, Default)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Opaque cursor for the page after this one, absent on the last page.
    pub next_page_token: Option<String>,
}

/// Fetch seam for [`PageNavigator`]. `None` requests the first page.
#[async_trait]
pub trait PageFetcher {
    type Item: Send;
    type Error;

    async fn fetch(&mut self, page_token: Option<&str>) -> Result<Page<Self::Item>, Self::Error>;
}

/// Button availability derived from navigator state. Pure; never fetches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageControls {
    pub first_enabled: bool,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PageControls {
    pub fn any_enabled(self) -> bool {
        self.first_enabled || self.previous_enabled || self.next_enabled
    }
}

/// Cursor-stack navigator over a remote ordered collection.
///
/// The remote store only hands out forward cursors, so going backwards
/// means replaying an earlier cursor: the stack holds the tokens that
/// fetched pages `1..=page_index`, giving the invariant
/// `previous_tokens.len() == page_index`. Only the pages adjacent to the
/// cursor stack are ever held in memory, never the whole collection.
///
/// Every mutation happens after its fetch succeeds, so a failed fetch
/// leaves the currently rendered page and the stack untouched.
pub struct PageNavigator<F: PageFetcher> {
    fetcher: F,
    items: Vec<F::Item>,
    next_page_token: Option<String>,
    page_index: usize,
    previous_tokens: Vec<String>,
}

impl<F: PageFetcher> PageNavigator<F> {
    /// Fetch page zero and build a navigator around it.
    pub async fn start(mut fetcher: F) -> Result<Self, F::Error> {
        let page = fetcher.fetch(None).await?;

        Ok(Self {
            fetcher,
            items: page.items,
            next_page_token: page.next_page_token,
            page_index: 0,
            previous_tokens: Vec::new(),
        })
    }

    pub fn items(&self) -> &[F::Item] {
        &self.items
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn has_next(&self) -> bool {
        self.next_page_token.is_some()
    }

    pub fn controls(&self) -> PageControls {
        PageControls {
            first_enabled: self.page_index > 0,
            previous_enabled: self.page_index > 0,
            next_enabled: self.has_next(),
        }
    }

    /// Move one page forward. Returns `Ok(false)` without fetching when no
    /// next-page cursor is held.
    pub async fn advance(&mut self) -> Result<bool, F::Error> {
        let Some(token) = self.next_page_token.clone() else {
            return Ok(false);
        };

        let page = self.fetcher.fetch(Some(&token)).await?;
        self.previous_tokens.push(token);
        self.items = page.items;
        self.next_page_token = page.next_page_token;
        self.page_index += 1;

        Ok(true)
    }

    /// Move one page back. Returns `Ok(false)` when already on page zero.
    pub async fn retreat(&mut self) -> Result<bool, F::Error> {
        if self.previous_tokens.is_empty() {
            return Ok(false);
        }

        // The top of the stack fetched the current page; the token below
        // it (or no cursor at all) fetches the one before.
        let target = self
            .previous_tokens
            .len()
            .checked_sub(2)
            .and_then(|below_top| self.previous_tokens.get(below_top))
            .cloned();

        let page = self.fetcher.fetch(target.as_deref()).await?;
        self.previous_tokens.pop();
        self.items = page.items;
        self.next_page_token = page.next_page_token;
        self.page_index -= 1;

        Ok(true)
    }

    /// Re-fetch page zero and reset navigation state. Entries may have
    /// changed since the first load, so nothing cached is reused.
    pub async fn jump_to_first(&mut self) -> Result<(), F::Error> {
        let page = self.fetcher.fetch(None).await?;
        self.previous_tokens.clear();
        self.items = page.items;
        self.next_page_token = page.next_page_token;
        self.page_index = 0;

        Ok(())
    }

    #[cfg(test)]
    fn stack_depth(&self) -> usize {
        self.previous_tokens.len()
    }
}

/// Render entries as a 1-based numbered list whose ranks continue across
/// pages.
pub fn numbered_lines<T>(
    items: &[T],
    page_index: usize,
    mut line: impl FnMut(&T) -> String,
) -> String {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            format!("{}. {}", page_index * PAGE_SIZE + position + 1, line(item))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{PAGE_SIZE, Page, PageFetcher, PageNavigator, numbered_lines};
    use async_trait::async_trait;

    /// Pages out of `entry_count` fake entries, 10 per page, with `p{n}`
    /// cursors. Can be told to fail the next fetch.
    struct FakeBoard {
        entry_count: usize,
        fail_next: bool,
        fetches: usize,
    }

    impl FakeBoard {
        fn new(entry_count: usize) -> Self {
            Self {
                entry_count,
                fail_next: false,
                fetches: 0,
            }
        }
    }

    #[async_trait]
    impl PageFetcher for FakeBoard {
        type Item = usize;
        type Error = String;

        async fn fetch(&mut self, page_token: Option<&str>) -> Result<Page<usize>, String> {
            if self.fail_next {
                self.fail_next = false;
                return Err("remote unavailable".to_owned());
            }

            self.fetches += 1;
            let page_number = match page_token {
                None => 0,
                Some(token) => token
                    .strip_prefix('p')
                    .and_then(|n| n.parse::<usize>().ok())
                    .ok_or_else(|| format!("bad token `{token}`"))?,
            };

            let start = page_number * PAGE_SIZE;
            let end = (start + PAGE_SIZE).min(self.entry_count);
            let items: Vec<usize> = (start..end).collect();
            let next_page_token =
                (end < self.entry_count).then(|| format!("p{}", page_number + 1));

            Ok(Page {
                items,
                next_page_token,
            })
        }
    }

    #[tokio::test]
    async fn walks_a_three_page_collection() {
        let mut nav = PageNavigator::start(FakeBoard::new(25)).await.unwrap();
        assert_eq!(nav.items().len(), 10);
        assert_eq!(nav.page_index(), 0);
        assert!(nav.has_next());

        assert!(nav.advance().await.unwrap());
        assert_eq!(nav.items(), (10..20).collect::<Vec<_>>());
        assert_eq!(nav.page_index(), 1);
        assert_eq!(nav.stack_depth(), 1);

        assert!(nav.advance().await.unwrap());
        assert_eq!(nav.items(), (20..25).collect::<Vec<_>>());
        assert_eq!(nav.page_index(), 2);
        assert_eq!(nav.stack_depth(), 2);
        assert!(!nav.has_next());

        assert!(nav.retreat().await.unwrap());
        assert_eq!(nav.items(), (10..20).collect::<Vec<_>>());
        assert_eq!(nav.page_index(), 1);
        assert_eq!(nav.stack_depth(), 1);
    }

    #[tokio::test]
    async fn stack_depth_tracks_page_index() {
        let mut nav = PageNavigator::start(FakeBoard::new(55)).await.unwrap();

        for forward in [true, true, true, false, true, false, false, true] {
            if forward {
                nav.advance().await.unwrap();
            } else {
                nav.retreat().await.unwrap();
            }
            assert_eq!(nav.stack_depth(), nav.page_index());
        }
    }

    #[tokio::test]
    async fn advance_without_next_page_is_a_noop() {
        let mut nav = PageNavigator::start(FakeBoard::new(5)).await.unwrap();
        assert!(!nav.has_next());

        assert!(!nav.advance().await.unwrap());
        assert_eq!(nav.page_index(), 0);
        assert_eq!(nav.items().len(), 5);
    }

    #[tokio::test]
    async fn retreat_on_page_zero_is_a_noop() {
        let mut nav = PageNavigator::start(FakeBoard::new(25)).await.unwrap();

        assert!(!nav.retreat().await.unwrap());
        assert_eq!(nav.page_index(), 0);
        assert_eq!(nav.stack_depth(), 0);
        // No fetch beyond the initial load happened.
        assert_eq!(nav.fetcher.fetches, 1);
    }

    #[tokio::test]
    async fn jump_to_first_resets_and_refetches() {
        let mut nav = PageNavigator::start(FakeBoard::new(45)).await.unwrap();
        nav.advance().await.unwrap();
        nav.advance().await.unwrap();
        nav.advance().await.unwrap();
        assert_eq!(nav.page_index(), 3);

        nav.jump_to_first().await.unwrap();
        assert_eq!(nav.page_index(), 0);
        assert_eq!(nav.stack_depth(), 0);
        assert_eq!(nav.items(), (0..10).collect::<Vec<_>>());
        // Initial load + three advances + a fresh first-page fetch.
        assert_eq!(nav.fetcher.fetches, 5);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_state_untouched() {
        let mut nav = PageNavigator::start(FakeBoard::new(25)).await.unwrap();
        nav.advance().await.unwrap();

        nav.fetcher.fail_next = true;
        assert!(nav.advance().await.is_err());
        assert_eq!(nav.page_index(), 1);
        assert_eq!(nav.stack_depth(), 1);
        assert_eq!(nav.items(), (10..20).collect::<Vec<_>>());

        nav.fetcher.fail_next = true;
        assert!(nav.retreat().await.is_err());
        assert_eq!(nav.page_index(), 1);
        assert_eq!(nav.stack_depth(), 1);

        nav.fetcher.fail_next = true;
        assert!(nav.jump_to_first().await.is_err());
        assert_eq!(nav.page_index(), 1);
        assert_eq!(nav.stack_depth(), 1);

        // The navigator still works once the remote recovers.
        assert!(nav.retreat().await.unwrap());
        assert_eq!(nav.page_index(), 0);
    }

    #[tokio::test]
    async fn controls_follow_position() {
        let mut nav = PageNavigator::start(FakeBoard::new(25)).await.unwrap();
        let controls = nav.controls();
        assert!(!controls.first_enabled);
        assert!(!controls.previous_enabled);
        assert!(controls.next_enabled);

        nav.advance().await.unwrap();
        nav.advance().await.unwrap();
        let controls = nav.controls();
        assert!(controls.first_enabled);
        assert!(controls.previous_enabled);
        assert!(!controls.next_enabled);
        assert!(controls.any_enabled());
    }

    #[test]
    fn numbered_lines_rank_across_pages() {
        let rendered = numbered_lines(&[90, 80, 70], 2, |value| format!("score {value}"));
        assert_eq!(rendered, "21. score 90\n22. score 80\n23. score 70");
    }
}
