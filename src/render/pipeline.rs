use rayon::prelude::*;

use crate::{
    assets::store::AvatarStore,
    compose::card::compose_card,
    foundation::error::{CardError, CardResult},
    model::{Favorites, RenderConfig, ScoreRow},
    render::cpu::CpuRenderer,
    render::frame::CardFrame,
    text::FontStore,
};

/// Compose and rasterize a single row.
///
/// This is the primary one-shot API: a pure function of its inputs with no
/// IO and no shared mutable state, so callers may invoke it concurrently
/// across rows without locking.
pub fn render_card(
    row: &ScoreRow,
    participants: &[String],
    avatars: &AvatarStore,
    favorites: &Favorites,
    fonts: &FontStore,
    config: &RenderConfig,
) -> CardResult<CardFrame> {
    let plan = compose_card(row, participants, avatars, favorites, fonts, config)?;
    CpuRenderer::new().render(&plan)
}

/// Threading configuration for [`render_cards`].
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Render rows across a rayon pool instead of sequentially.
    pub parallel: bool,
    /// Worker count when parallel; `None` uses rayon's default.
    pub threads: Option<usize>,
}

/// Render every row of a dataset.
///
/// With `threading.parallel` set, rows are distributed over a dedicated
/// rayon pool with one [`CpuRenderer`] per worker; the stores are shared
/// read-only snapshots. A failing row propagates its error without
/// corrupting other in-flight renders.
pub fn render_cards(
    rows: &[ScoreRow],
    participants: &[String],
    avatars: &AvatarStore,
    favorites: &Favorites,
    fonts: &FontStore,
    config: &RenderConfig,
    threading: &RenderThreading,
) -> CardResult<Vec<CardFrame>> {
    if !threading.parallel {
        let mut renderer = CpuRenderer::new();
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let plan = compose_card(row, participants, avatars, favorites, fonts, config)?;
            out.push(renderer.render(&plan)?);
        }
        return Ok(out);
    }

    let pool = build_thread_pool(threading.threads)?;
    let rendered = pool.install(|| {
        rows.par_iter()
            .map_init(CpuRenderer::new, |renderer, row| -> CardResult<CardFrame> {
                let plan = compose_card(row, participants, avatars, favorites, fonts, config)?;
                renderer.render(&plan)
            })
            .collect::<Vec<_>>()
    });

    rendered.into_iter().collect()
}

/// Suggested archival filename for a rendered card:
/// `card_<rank, zero-padded 3>_<song with '/' replaced by '-'>.png`.
///
/// Owned by the export collaborator; the engine itself never touches the
/// filesystem.
pub fn card_filename(rank: u32, song: &str) -> String {
    format!("card_{:03}_{}.png", rank, song.trim().replace('/', "-"))
}

fn build_thread_pool(threads: Option<usize>) -> CardResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CardError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CardError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
