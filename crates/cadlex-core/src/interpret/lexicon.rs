//! Closed per-locale word tables
//!
//! Keywords select the operation, labels locate parameter values, fillers and
//! separators are skipped. Everything is lower-case; matching happens on
//! lower-cased text.

use crate::model::{Color, Locale, OperationKind};

/// Word tables for one locale
#[derive(Debug)]
pub struct Lexicon {
    pub locale: Locale,
    /// Trigger phrases per kind. Multi-word phrases tolerate articles,
    /// modifiers and color names between their words.
    pub keywords: &'static [(OperationKind, &'static [&'static str])],
    /// Articles, prepositions and command verbs
    pub fillers: &'static [&'static str],
    /// Words allowed inside a multi-word keyword ("create a new layer")
    pub keyword_gaps: &'static [&'static str],
    /// Words allowed between a label and its value ("radius of 5")
    pub separators: &'static [&'static str],
    /// Label phrases per parameter name
    pub labels: &'static [(&'static str, &'static [&'static str])],
    pub colors: &'static [(&'static str, Color)],
    /// Words whose mere presence sets a flag parameter
    pub flags: &'static [(&'static str, &'static [&'static str])],
}

impl Lexicon {
    pub fn for_locale(locale: Locale) -> &'static Lexicon {
        match locale {
            Locale::En => &ENGLISH,
            Locale::Es => &SPANISH,
        }
    }

    /// Whether `word` is part of any operation keyword phrase
    pub fn is_keyword_word(&self, word: &str) -> bool {
        self.keywords
            .iter()
            .flat_map(|(_, phrases)| phrases.iter())
            .any(|phrase| phrase.split(' ').any(|w| w == word))
    }

    pub fn labels_for(&self, param: &str) -> &'static [&'static str] {
        self.labels
            .iter()
            .find(|(name, _)| *name == param)
            .map(|(_, phrases)| *phrases)
            .unwrap_or(&[])
    }

    pub fn flag_words_for(&self, param: &str) -> &'static [&'static str] {
        self.flags
            .iter()
            .find(|(name, _)| *name == param)
            .map(|(_, words)| *words)
            .unwrap_or(&[])
    }

    /// Resolve a color word (canonical name or locale synonym)
    pub fn color(&self, word: &str) -> Option<Color> {
        let lowered = word.trim().to_lowercase();
        self.colors
            .iter()
            .find(|(name, _)| *name == lowered)
            .map(|(_, color)| *color)
    }

    pub fn is_filler(&self, word: &str) -> bool {
        self.fillers.contains(&word)
    }

    pub fn is_separator(&self, word: &str) -> bool {
        self.separators.contains(&word)
    }

    /// Whether `word` appears in any label phrase of any parameter
    pub fn is_label_word(&self, word: &str) -> bool {
        self.labels
            .iter()
            .flat_map(|(_, phrases)| phrases.iter())
            .any(|phrase| phrase.split(' ').any(|w| w == word))
    }

    pub fn is_flag_word(&self, word: &str) -> bool {
        self.flags
            .iter()
            .flat_map(|(_, words)| words.iter())
            .any(|w| *w == word)
    }
}

static ENGLISH: Lexicon = Lexicon {
    locale: Locale::En,
    keywords: &[
        (OperationKind::DrawLine, &["line", "segment"]),
        (OperationKind::DrawCircle, &["circle"]),
        (OperationKind::DrawArc, &["arc", "curve"]),
        (
            OperationKind::DrawRectangle,
            &["rectangle", "rect", "square", "box"],
        ),
        (OperationKind::DrawPolyline, &["polyline", "polygon", "path"]),
        (OperationKind::DrawEllipse, &["ellipse", "oval"]),
        (OperationKind::DrawText, &["text", "label", "note"]),
        (OperationKind::DrawHatch, &["hatch", "fill"]),
        (OperationKind::InsertBlock, &["insert block", "block"]),
        (
            OperationKind::CreateLayer,
            &["create layer", "new layer", "add layer", "make layer"],
        ),
        (OperationKind::RenameLayer, &["rename layer", "rename"]),
        (
            OperationKind::DeleteLayer,
            &["delete layer", "remove layer", "erase layer"],
        ),
        (
            OperationKind::TurnLayerOn,
            &["turn on layer", "show layer", "unhide layer", "enable layer"],
        ),
        (
            OperationKind::TurnLayerOff,
            &["turn off layer", "hide layer", "disable layer"],
        ),
        (
            OperationKind::ListLayers,
            &[
                "list layers",
                "show layers",
                "list all layers",
                "show all layers",
            ],
        ),
    ],
    fillers: &[
        "a", "an", "the", "with", "on", "of", "in", "and", "by", "for", "using", "please", "draw",
        "create", "make", "add", "insert", "place", "put", "sketch", "plot", "write", "new",
        "that", "which", "is", "it",
    ],
    keyword_gaps: &["a", "an", "the", "new"],
    separators: &["=", ":", "of", "by", "is", "equal", "the"],
    labels: &[
        ("start", &["from", "start", "starting at"]),
        ("end", &["to", "end", "ending at"]),
        ("corner1", &["from", "corner", "first corner"]),
        ("corner2", &["to", "second corner", "opposite corner"]),
        ("center", &["at", "center", "centre", "centered at"]),
        ("radius", &["radius", "r"]),
        ("start_angle", &["start angle", "from", "start"]),
        ("end_angle", &["end angle", "to", "end"]),
        ("points", &["points", "through", "vertices"]),
        ("boundary", &["boundary", "points", "through"]),
        ("major_axis", &["major axis", "major", "width"]),
        ("minor_ratio", &["minor ratio", "ratio", "minor"]),
        ("position", &["at", "position"]),
        ("text", &["text", "saying", "content", "reading"]),
        ("height", &["height", "size"]),
        ("rotation", &["rotation", "rotated", "angle"]),
        ("pattern", &["pattern"]),
        ("scale", &["scale", "scaled"]),
        ("block_name", &["block", "named", "called"]),
        ("insertion_point", &["at", "insertion point", "insertion"]),
        ("name", &["layer", "named", "called"]),
        ("old_name", &["layer", "rename"]),
        ("new_name", &["to", "as", "into"]),
        ("color", &["color", "colour"]),
        ("layer", &["layer"]),
        ("lineweight", &["lineweight", "weight", "thickness"]),
    ],
    colors: &[
        ("black", Color::Black),
        ("red", Color::Red),
        ("green", Color::Green),
        ("blue", Color::Blue),
        ("yellow", Color::Yellow),
        ("magenta", Color::Magenta),
        ("cyan", Color::Cyan),
        ("white", Color::White),
        ("gray", Color::Gray),
        ("grey", Color::Gray),
        ("orange", Color::Orange),
    ],
    flags: &[("closed", &["closed"])],
};

static SPANISH: Lexicon = Lexicon {
    locale: Locale::Es,
    keywords: &[
        (OperationKind::DrawLine, &["línea", "linea", "segmento"]),
        (
            OperationKind::DrawCircle,
            &["círculo", "circulo", "circunferencia"],
        ),
        (OperationKind::DrawArc, &["arco"]),
        (
            OperationKind::DrawRectangle,
            &["rectángulo", "rectangulo", "cuadrado"],
        ),
        (
            OperationKind::DrawPolyline,
            &["polilínea", "polilinea", "polígono", "poligono"],
        ),
        (OperationKind::DrawEllipse, &["elipse", "óvalo", "ovalo"]),
        (OperationKind::DrawText, &["texto", "etiqueta", "nota"]),
        (OperationKind::DrawHatch, &["sombreado", "relleno", "trama"]),
        (
            OperationKind::InsertBlock,
            &["insertar bloque", "inserta bloque", "bloque"],
        ),
        (
            OperationKind::CreateLayer,
            &[
                "crear capa",
                "crea capa",
                "nueva capa",
                "agregar capa",
                "añadir capa",
            ],
        ),
        (
            OperationKind::RenameLayer,
            &["renombrar capa", "renombra capa", "renombrar"],
        ),
        (
            OperationKind::DeleteLayer,
            &["eliminar capa", "elimina capa", "borrar capa", "borra capa"],
        ),
        (
            OperationKind::TurnLayerOn,
            &[
                "activar capa",
                "activa capa",
                "mostrar capa",
                "muestra capa",
                "encender capa",
            ],
        ),
        (
            OperationKind::TurnLayerOff,
            &[
                "desactivar capa",
                "desactiva capa",
                "ocultar capa",
                "oculta capa",
                "apagar capa",
            ],
        ),
        (
            OperationKind::ListLayers,
            &[
                "listar capas",
                "lista capas",
                "mostrar capas",
                "listar todas las capas",
                "mostrar todas las capas",
            ],
        ),
    ],
    fillers: &[
        "un", "una", "el", "la", "los", "las", "con", "en", "de", "del", "y", "por", "para",
        "dibuja", "dibujar", "dibuje", "crea", "crear", "cree", "traza", "trazar", "agrega",
        "agregar", "añade", "añadir", "inserta", "insertar", "nueva", "nuevo", "que", "es",
    ],
    keyword_gaps: &["un", "una", "el", "la", "nueva", "nuevo"],
    separators: &["=", ":", "de", "es", "igual"],
    labels: &[
        ("start", &["desde", "de", "inicio"]),
        ("end", &["hasta", "a", "fin"]),
        ("corner1", &["desde", "de", "esquina"]),
        ("corner2", &["hasta", "a"]),
        ("center", &["en", "centro", "centrado en"]),
        ("radius", &["radio"]),
        (
            "start_angle",
            &["ángulo inicial", "angulo inicial", "desde", "de"],
        ),
        ("end_angle", &["ángulo final", "angulo final", "hasta", "a"]),
        ("points", &["puntos", "por"]),
        ("boundary", &["contorno", "puntos", "por"]),
        ("major_axis", &["eje mayor", "eje"]),
        (
            "minor_ratio",
            &["proporción", "proporcion", "relación", "relacion"],
        ),
        ("position", &["en", "posición", "posicion"]),
        ("text", &["texto", "que diga", "contenido"]),
        ("height", &["altura", "tamaño", "tamano"]),
        ("rotation", &["rotación", "rotacion", "ángulo", "angulo"]),
        ("pattern", &["patrón", "patron"]),
        ("scale", &["escala"]),
        ("block_name", &["bloque", "llamado", "nombre"]),
        ("insertion_point", &["en", "punto de inserción", "inserción"]),
        ("name", &["capa", "llamada", "nombre"]),
        ("old_name", &["capa", "renombrar"]),
        ("new_name", &["a", "como"]),
        ("color", &["color"]),
        ("layer", &["capa"]),
        ("lineweight", &["grosor", "peso"]),
    ],
    colors: &[
        ("negro", Color::Black),
        ("rojo", Color::Red),
        ("verde", Color::Green),
        ("azul", Color::Blue),
        ("amarillo", Color::Yellow),
        ("magenta", Color::Magenta),
        ("cian", Color::Cyan),
        ("blanco", Color::White),
        ("gris", Color::Gray),
        ("naranja", Color::Orange),
        // Canonical names are always understood
        ("black", Color::Black),
        ("red", Color::Red),
        ("green", Color::Green),
        ("blue", Color::Blue),
        ("yellow", Color::Yellow),
        ("cyan", Color::Cyan),
        ("white", Color::White),
        ("gray", Color::Gray),
        ("grey", Color::Gray),
        ("orange", Color::Orange),
    ],
    flags: &[("closed", &["cerrada", "cerrado"])],
};
