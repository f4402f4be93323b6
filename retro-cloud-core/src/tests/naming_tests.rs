use super::*;

#[test]
fn strips_region_and_status_tags() {
    assert_eq!(normalize_key("Zelda (USA) [!].nes"), "zelda");
}

#[test]
fn punctuation_becomes_single_spaces() {
    assert_eq!(
        normalize_key("Legend of Zelda, The - A Link to the Past (USA).sfc"),
        "legend of zelda the a link to the past"
    );
}

#[test]
fn keeps_numbers_after_a_dot() {
    assert_eq!(normalize_key("Super Mario Bros. 3"), "super mario bros 3");
    assert_eq!(normalize_key("Super Mario Bros. 3 (USA).nes"), "super mario bros 3");
}

#[test]
fn nested_and_multiple_tags() {
    assert_eq!(
        normalize_key("Final Fantasy VII (USA) (Disc 1) [b (hack)].bin"),
        "final fantasy vii"
    );
}

#[test]
fn normalize_is_idempotent() {
    let inputs = [
        "Zelda (USA) [!].nes",
        "Last Blade, The (UE) [!].npc",
        "Pokemon - Red Version (USA, Europe) (SGB Enhanced).gb",
        "Metal Slug X.zip",
        "mslug.zip",
        "  spaced   out  ",
        "Castlevania - Symphony of the Night (USA) (Track 1).bin",
        "",
    ];
    for input in inputs {
        let once = normalize_key(input);
        assert_eq!(normalize_key(&once), once, "not idempotent for {:?}", input);
    }
}

#[test]
fn non_ascii_letters_are_separators() {
    assert_eq!(normalize_key("Pokémon Snap (USA).z64"), "pok mon snap");
}

#[test]
fn arcade_short_name_is_expanded() {
    assert_eq!(normalize_key("mslug.zip"), "metal slug super vehicle 001");
    assert_eq!(normalize_key("KOF98.ZIP"), "the king of fighters 98 the slugfest");
}

#[test]
fn arcade_lookup_needs_an_extension() {
    assert_eq!(normalize_key("sf2"), "sf2");
}

#[test]
fn split_extension_rules() {
    assert_eq!(split_extension("game.nes"), ("game", Some("nes")));
    assert_eq!(split_extension("game.32x"), ("game", Some("32x")));
    assert_eq!(split_extension("Vol. 2"), ("Vol. 2", None));
    assert_eq!(split_extension("Vol.2"), ("Vol.2", None));
    assert_eq!(split_extension(".hidden"), (".hidden", None));
    assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", Some("gz")));
}

#[test]
fn display_name_strips_tags() {
    assert_eq!(display_name("Chrono Trigger (USA).sfc"), "Chrono Trigger");
    assert_eq!(display_name("Zelda (USA) [!].nes"), "Zelda");
}

#[test]
fn display_name_moves_article() {
    assert_eq!(
        display_name("Legend of Zelda, The - Link's Awakening (USA).gb"),
        "The Legend of Zelda - Link's Awakening"
    );
    assert_eq!(display_name("Last Blade, the (UE).npc"), "The Last Blade");
}

#[test]
fn display_name_uses_arcade_table() {
    assert_eq!(display_name("sf2.zip"), "Street Fighter II - The World Warrior");
}

#[test]
fn entry_id_format() {
    assert_eq!(entry_id("Chrono Trigger (USA).sfc"), "chrono_trigger_(usa)_sfc");
}

#[test]
fn thumbnail_safe_name_replaces_reserved_chars() {
    assert_eq!(
        thumbnail_safe_name("Tom & Jerry: The Movie?"),
        "Tom _ Jerry_ The Movie_"
    );
}

#[test]
fn strip_tags_handles_unterminated_segment() {
    assert_eq!(strip_tags("Game (USA"), "Game");
    assert_eq!(strip_tags("Game) (USA)"), "Game)");
}

#[test]
fn normalize_title_skips_extension_handling() {
    assert_eq!(normalize_title("Vol.II (Japan)"), "vol ii");
    assert_eq!(normalize_title("Galaga"), "galaga");
}
