//! Plain-text output of a result set, one shape per gallery layout.

use std::fmt::Write as _;

use shared::domain::{GalleryLayout, Photo};

const GRID_COLUMNS: usize = 4;
const GRID_CELL_WIDTH: usize = 16;

pub fn render(layout: GalleryLayout, photos: &[Photo]) -> String {
    if photos.is_empty() {
        return "no photos\n".to_string();
    }
    match layout {
        GalleryLayout::Grid => render_grid(photos),
        GalleryLayout::Carousel => render_carousel(photos),
        GalleryLayout::List => render_list(photos),
        GalleryLayout::Cards => render_cards(photos),
    }
}

fn caption(photo: &Photo) -> &str {
    photo.alt_text.as_deref().unwrap_or("untitled")
}

fn render_grid(photos: &[Photo]) -> String {
    let mut out = String::new();
    for row in photos.chunks(GRID_COLUMNS) {
        let cells: Vec<String> = row
            .iter()
            .map(|photo| format!("{:<width$}", photo.id.to_string(), width = GRID_CELL_WIDTH))
            .collect();
        out.push_str(cells.join(" ").trim_end());
        out.push('\n');
    }
    out
}

fn render_carousel(photos: &[Photo]) -> String {
    let total = photos.len();
    let mut out = String::new();
    for (index, photo) in photos.iter().enumerate() {
        let _ = writeln!(
            out,
            "[{}/{total}] {} {}",
            index + 1,
            caption(photo),
            photo.image_urls.regular
        );
    }
    out
}

fn render_list(photos: &[Photo]) -> String {
    let mut out = String::new();
    for photo in photos {
        let _ = writeln!(
            out,
            "{}  {}  by {} (@{})  {} likes",
            photo.id,
            caption(photo),
            photo.creator.name,
            photo.creator.username,
            photo.like_count
        );
    }
    out
}

fn render_cards(photos: &[Photo]) -> String {
    let mut out = String::new();
    for photo in photos {
        let views = photo
            .view_count
            .map(|views| format!(", {views} views"))
            .unwrap_or_default();
        let _ = writeln!(out, "{}", caption(photo));
        let _ = writeln!(out, "  id:      {}", photo.id);
        let _ = writeln!(
            out,
            "  by:      {} (@{})",
            photo.creator.name, photo.creator.username
        );
        let _ = writeln!(
            out,
            "  size:    {}x{}",
            photo.dimensions.width, photo.dimensions.height
        );
        let _ = writeln!(out, "  stats:   {} likes{views}", photo.like_count);
        let _ = writeln!(out, "  taken:   {}", photo.created_at.format("%Y-%m-%d"));
        let _ = writeln!(out, "  image:   {}", photo.image_urls.small);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use shared::domain::{Creator, Dimensions, ImageUrls, PhotoId};

    use super::*;

    fn photo(id: &str, alt: Option<&str>) -> Photo {
        Photo {
            id: PhotoId(id.to_string()),
            image_urls: ImageUrls {
                raw: format!("https://img/{id}/raw"),
                full: format!("https://img/{id}/full"),
                regular: format!("https://img/{id}/regular"),
                small: format!("https://img/{id}/small"),
                thumb: format!("https://img/{id}/thumb"),
            },
            alt_text: alt.map(str::to_string),
            creator: Creator {
                name: "Vivian Maier".to_string(),
                username: "vmaier".to_string(),
                avatar_url: "https://avatars/vm".to_string(),
            },
            dimensions: Dimensions {
                width: 600,
                height: 600,
            },
            like_count: 9,
            view_count: Some(90),
            created_at: "2022-07-09T16:30:00Z".parse().expect("timestamp"),
        }
    }

    #[test]
    fn empty_result_prints_placeholder() {
        assert_eq!(render(GalleryLayout::Cards, &[]), "no photos\n");
    }

    #[test]
    fn list_prints_one_line_per_photo() {
        let out = render(
            GalleryLayout::List,
            &[photo("a1", Some("street")), photo("a2", None)],
        );
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "a1  street  by Vivian Maier (@vmaier)  9 likes");
        assert!(lines[1].contains("untitled"));
    }

    #[test]
    fn grid_wraps_rows() {
        let photos: Vec<_> = (0..6).map(|i| photo(&format!("g{i}"), None)).collect();
        let out = render(GalleryLayout::Grid, &photos);
        let rows: Vec<_> = out.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("g0"));
        assert!(rows[1].starts_with("g4"));
        assert!(rows[1].ends_with("g5"));
    }

    #[test]
    fn carousel_numbers_slides() {
        let out = render(
            GalleryLayout::Carousel,
            &[photo("c1", Some("one")), photo("c2", Some("two"))],
        );
        assert!(out.starts_with("[1/2] one https://img/c1/regular\n"));
        assert!(out.contains("[2/2] two"));
    }

    #[test]
    fn cards_include_stats_and_date() {
        let out = render(GalleryLayout::Cards, &[photo("k1", Some("pier"))]);
        assert!(out.contains("  stats:   9 likes, 90 views"));
        assert!(out.contains("  taken:   2022-07-09"));
        assert!(out.contains("  size:    600x600"));
    }
}
