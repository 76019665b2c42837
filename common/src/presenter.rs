//! 検索結果の表示状態
//!
//! ストアから届いた結果一覧と、拡大表示中の1件を持つ。

use std::cell::RefCell;
use std::rc::Rc;

use crate::store::{ResultStore, SubscriptionId};
use crate::types::SearchResult;

/// パスの最後の要素を表示名にする（`\` は `/` とみなす）
///
/// 最後の要素が空（末尾が区切り文字）の場合はパスをそのまま返す。
pub fn file_name(path: &str) -> &str {
    if path.is_empty() {
        return "";
    }
    match path.rsplit(|c: char| c == '/' || c == '\\').next() {
        Some(last) if !last.is_empty() => last,
        _ => path,
    }
}

/// 一覧の1行分
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntry {
    pub label: String,
    pub path: String,
    pub url: String,
    pub distance: f64,
}

impl From<&SearchResult> for ResultEntry {
    fn from(result: &SearchResult) -> Self {
        Self {
            label: file_name(&result.path).to_string(),
            path: result.path.clone(),
            url: result.url.clone(),
            distance: result.distance,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultPresenter {
    results: Vec<SearchResult>,
    inspected: Option<SearchResult>,
}

impl ResultPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// ストアに購読させた presenter を返す
    pub fn attach(store: &ResultStore) -> (Rc<RefCell<ResultPresenter>>, SubscriptionId) {
        let presenter = Rc::new(RefCell::new(ResultPresenter::new()));
        let sink = Rc::clone(&presenter);
        let id = store.subscribe(move |results| sink.borrow_mut().show(results));
        (presenter, id)
    }

    pub fn show(&mut self, results: &[SearchResult]) {
        self.results = results.to_vec();
    }

    /// 拡大表示する（既に開いているものは置き換える）
    pub fn open(&mut self, result: SearchResult) {
        self.inspected = Some(result);
    }

    /// 現在の一覧からパスで探して拡大表示する
    pub fn open_path(&mut self, path: &str) -> bool {
        match self.results.iter().find(|r| r.path == path) {
            Some(result) => {
                self.inspected = Some(result.clone());
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.inspected = None;
    }

    pub fn inspected(&self) -> Option<&SearchResult> {
        self.inspected.as_ref()
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn entries(&self) -> Vec<ResultEntry> {
        self.results.iter().map(ResultEntry::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
