//! Synonym table and query expansion.

use lazy_static::lazy_static;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::stemmer::stem;

const ENGLISH: &[(&str, &[&str])] = &[
        ("fast", &["quick", "rapid", "speedy", "swift", "hasty", "expeditious", "brisk"]),
        ("quick", &["fast", "rapid", "speedy", "swift", "hasty", "prompt", "immediate"]),
        ("search", &["find", "lookup", "query", "seek", "explore", "investigate", "scan"]),
        ("find", &["search", "locate", "discover", "detect", "uncover", "spot", "identify"]),
        ("computer", &["pc", "laptop", "machine", "device", "workstation", "desktop", "mainframe"]),
        ("phone", &["mobile", "cellphone", "smartphone", "handset", "telephone", "cellular", "dialer"]),
        ("buy", &["purchase", "order", "get", "acquire", "procure", "obtain", "shop"]),
        ("best", &["top", "greatest", "finest", "supreme", "ultimate", "optimal", "prime"]),
        ("happy", &["joyful", "cheerful", "delighted", "content", "glad", "ecstatic", "elated"]),
        ("sad", &["unhappy", "sorrowful", "depressed", "gloomy", "miserable", "dejected", "downcast"]),
        ("big", &["large", "huge", "massive", "giant", "enormous", "immense", "colossal"]),
        ("small", &["tiny", "little", "miniature", "slight", "compact", "minute", "petite"]),
        ("good", &["excellent", "great", "fine", "wonderful", "superb", "splendid", "marvelous"]),
        ("bad", &["poor", "terrible", "awful", "horrible", "dreadful", "nasty", "inferior"]),
        ("smart", &["intelligent", "clever", "bright", "sharp", "brainy", "genius", "wise"]),
        ("dumb", &["stupid", "foolish", "silly", "dense", "ignorant", "slow", "unwise"]),
        ("hard", &["difficult", "tough", "challenging", "strenuous", "arduous", "solid", "firm"]),
        ("easy", &["simple", "effortless", "smooth", "basic", "clear", "manageable", "light"]),
        ("love", &["adore", "cherish", "treasure", "admire", "fancy", "idolize", "worship"]),
        ("hate", &["dislike", "detest", "loathe", "despise", "abhor", "scorn", "reject"]),
        ("run", &["sprint", "jog", "dash", "race", "rush", "hurry", "bolt"]),
        ("walk", &["stroll", "march", "hike", "trek", "wander", "roam", "step"]),
        ("eat", &["consume", "devour", "ingest", "swallow", "munch", "chew", "dine"]),
        ("drink", &["sip", "gulp", "swallow", "imbibe", "quaff", "chug", "slurp"]),
        ("sleep", &["rest", "doze", "nap", "snooze", "slumber", "dream", "hibernate"]),
        ("wake", &["arise", "awaken", "rouse", "stir", "get up", "revive", "activate"]),
        ("laugh", &["chuckle", "giggle", "snicker", "cackle", "roar", "smile", "grin"]),
        ("cry", &["weep", "sob", "wail", "whimper", "bawl", "teary", "mourn"]),
        ("beautiful", &["pretty", "lovely", "gorgeous", "stunning", "attractive", "handsome", "fair"]),
        ("ugly", &["unattractive", "hideous", "unsightly", "repulsive", "gross", "plain", "homely"]),
        ("new", &["fresh", "modern", "recent", "current", "novel", "original", "latest"]),
        ("old", &["ancient", "aged", "antique", "vintage", "elderly", "mature", "past"]),
        ("rich", &["wealthy", "affluent", "prosperous", "loaded", "moneyed", "flush", "opulent"]),
        ("poor", &["needy", "broke", "destitute", "impoverished", "penniless", "bankrupt", "lacking"]),
        ("strong", &["powerful", "mighty", "robust", "sturdy", "tough", "muscular", "potent"]),
        ("weak", &["frail", "feeble", "fragile", "delicate", "shaky", "powerless", "faint"]),
        ("clean", &["wash", "scrub", "purify", "sanitize", "wipe", "clear", "tidy"]),
        ("dirty", &["filthy", "messy", "grimy", "muddy", "polluted", "stained", "unclean"]),
        ("hot", &["warm", "burning", "boiling", "scorching", "scalding", "heated", "fiery"]),
        ("cold", &["cool", "chilly", "freezing", "icy", "frigid", "frosty", "frozen"]),
        ("start", &["begin", "commence", "initiate", "launch", "open", "originate", "activate"]),
        ("stop", &["end", "halt", "cease", "finish", "terminate", "conclude", "pause"]),
        ("win", &["succeed", "triumph", "prevail", "conquer", "beat", "overcome", "master"]),
        ("lose", &["fail", "forfeit", "drop", "misplace", "surrender", "yield", "flop"]),
        ("friend", &["buddy", "pal", "mate", "companion", "ally", "partner", "comrade"]),
        ("enemy", &["foe", "opponent", "rival", "adversary", "antagonist", "competitor", "nemesis"]),
        ("help", &["assist", "aid", "support", "guide", "serve", "relieve", "benefit"]),
        ("hurt", &["injure", "harm", "damage", "wound", "pain", "impair", "mar"]),
        ("give", &["provide", "offer", "donate", "grant", "supply", "present", "hand"]),
        ("take", &["grab", "seize", "capture", "snatch", "accept", "receive", "remove"]),
        ("look", &["see", "watch", "view", "observe", "gaze", "stare", "glance"]),
        ("listen", &["hear", "attend", "heark", "overhear", "audit", "hark", "monitor"]),
        ("think", &["ponder", "consider", "contemplate", "reflect", "imagine", "reason", "believe"]),
        ("know", &["understand", "comprehend", "realize", "recognize", "perceive", "grasp", "learn"]),
        ("say", &["speak", "tell", "state", "utter", "voice", "declare", "announce"]),
        ("ask", &["question", "inquire", "request", "demand", "interrogate", "query", "invite"]),
        ("answer", &["reply", "respond", "retort", "explain", "acknowledge", "feedback", "return"]),
        ("work", &["labor", "toil", "job", "task", "effort", "employment", "occupation"]),
        ("play", &["game", "sport", "fun", "recreation", "amusement", "entertainment", "hobby"]),
        ("learn", &["study", "educate", "train", "master", "acquire", "research", "read"]),
        ("teach", &["instruct", "tutor", "coach", "educate", "train", "mentor", "guide"]),
        ("write", &["record", "pen", "scribble", "draft", "compose", "author", "note"]),
        ("read", &["peruse", "scan", "review", "study", "browse", "decipher", "comprehend"]),
        ("create", &["make", "build", "construct", "design", "invent", "produce", "generate"]),
        ("destroy", &["ruin", "demolish", "wreck", "smash", "crush", "annihilate", "devastate"]),
        ("move", &["go", "travel", "proceed", "advance", "shift", "transport", "relocate"]),
        ("stay", &["remain", "wait", "linger", "dwell", "reside", "stick", "abide"]),
        ("change", &["alter", "modify", "transform", "adjust", "convert", "vary", "switch"]),
        ("keep", &["hold", "retain", "save", "preserve", "maintain", "store", "possess"]),
        ("show", &["display", "reveal", "present", "demonstrate", "exhibit", "uncover"]),
        ("hide", &["conceal", "cover", "mask", "cloak", "bury", "screen", "shroud"]),
        ("open", &["unlock", "unwrap", "uncover", "expand", "reveal", "access", "expose"]),
        ("close", &["shut", "seal", "lock", "block", "end", "finish", "secure"]),
        ("true", &["correct", "accurate", "right", "real", "actual", "genuine", "factual"]),
        ("false", &["wrong", "incorrect", "fake", "untrue", "bogus", "invalid", "erroneous"]),
        ("same", &["identical", "equal", "equivalent", "matching", "similar", "duplicate", "uniform"]),
        ("different", &["distinct", "diverse", "unlike", "varied", "separate", "unique", "contrasting"]),
        ("important", &["significant", "crucial", "essential", "vital", "key", "major", "critical"]),
        ("trivial", &["minor", "unimportant", "insignificant", "petty", "slight", "small", "worthless"]),
        ("safe", &["secure", "protected", "guarded", "harmless", "sheltered", "risk-free", "sound"]),
        ("dangerous", &["risky", "unsafe", "hazardous", "perilous", "threatening", "harmful", "deadly"]),
        ("quiet", &["silent", "calm", "peaceful", "still", "hushed", "mute", "soundless"]),
        ("loud", &["noisy", "deafening", "boisterous", "thunderous", "roaring", "blaring", "shouting"]),
        ("money", &["cash", "currency", "funds", "capital", "wealth", "assets", "dough"]),
        ("time", &["moment", "period", "duration", "epoch", "era", "interval", "span"]),
        ("place", &["location", "spot", "area", "region", "site", "zone", "venue"]),
        ("idea", &["concept", "thought", "notion", "plan", "opinion", "belief", "view"]),
        ("problem", &["issue", "difficulty", "trouble", "challenge", "dilemma", "conflict", "snag"]),
        ("solution", &["answer", "resolution", "fix", "remedy", "result", "outcome", "key"]),
        ("story", &["tale", "narrative", "account", "yarn", "chronicle", "legend", "report"]),
        ("book", &["novel", "text", "volume", "publication", "tome", "manual", "guide"]),
        ("music", &["song", "melody", "tune", "track", "rhythm", "harmony", "sound"]),
        ("art", &["creation", "design", "drawing", "painting", "sculpture", "craft", "work"]),
        ("game", &["match", "contest", "competition", "sport", "event", "tournament", "play"]),
        ("team", &["group", "squad", "crew", "unit", "club", "party", "gang"]),
        ("family", &["relatives", "kin", "clan", "household", "tribe", "lineage", "ancestors"]),
        ("house", &["home", "dwelling", "residence", "abode", "shelter", "building", "quarters"]),
        ("school", &["academy", "college", "institute", "university", "class", "seminary", "campus"]),
        ("city", &["town", "metropolis", "urban", "municipality", "capital", "burgh", "village"]),
        ("country", &["nation", "state", "land", "realm", "kingdom", "territory", "region"]),
        ("world", &["earth", "globe", "planet", "universe", "cosmos", "nature", "creation"]),
        ("animal", &["creature", "beast", "critter", "fauna", "pet", "wildlife", "organism"]),
        ("plant", &["herb", "flora", "vegetation", "shrub", "weed", "flower", "seedling"]),
        ("fire", &["flame", "blaze", "inferno", "spark", "heat", "combustion", "burn"]),
        ("water", &["liquid", "fluid", "h2o", "aqua", "rain", "stream", "ocean"]),
        ("air", &["oxygen", "atmosphere", "breeze", "wind", "gas", "sky", "breath"]),
        ("earth", &["soil", "dirt", "ground", "land", "mud", "terrain", "dust"]),
        ("space", &["cosmos", "void", "universe", "galaxy", "expanse", "room", "gap"]),
        ("light", &["bright", "shine", "glow", "beam", "ray", "illumination", "radiance"]),
        ("dark", &["shadow", "gloom", "dim", "black", "night", "shade", "obscure"]),
        ("color", &["hue", "tint", "shade", "tone", "pigment", "dye", "paint"]),
        ("red", &["crimson", "scarlet", "ruby", "cherry", "rose", "brick", "maroon"]),
        ("blue", &["azure", "cobalt", "navy", "indigo", "sapphire", "sky", "teal"]),
        ("green", &["emerald", "lime", "olive", "jade", "forest", "mint", "verdant"]),
        ("yellow", &["amber", "gold", "lemon", "citron", "cream", "blonde", "sun"]),
        ("black", &["ebony", "jet", "ink", "coal", "obsidian", "dark", "sable"]),
        ("white", &["snow", "ivory", "pearl", "chalk", "milk", "pale", "pure"]),
        ("shape", &["form", "figure", "outline", "structure", "profile", "mold", "pattern"]),
        ("circle", &["round", "ring", "loop", "sphere", "orb", "disk", "halo"]),
        ("square", &["box", "cube", "block", "quad", "rect", "tile", "grid"]),
        ("line", &["stripe", "bar", "row", "dash", "stroke", "rule", "path"]),
        ("point", &["dot", "spot", "mark", "speck", "tip", "end", "goal"]),
        ("number", &["digit", "figure", "integer", "count", "amount", "value", "sum"]),
        ("math", &["calc", "algebra", "logic", "sums", "arithmetic", "figures", "counting"]),
        ("science", &["study", "research", "biology", "physics", "chem", "tech", "knowledge"]),
        ("history", &["past", "events", "record", "story", "heritage", "roots", "legacy"]),
        ("future", &["tomorrow", "fate", "destiny", "prospect", "outlook", "later", "coming"]),
        ("present", &["now", "current", "today", "gift", "here", "moment", "instant"]),
        ("body", &["frame", "form", "figure", "physique", "anatomy", "build", "flesh"]),
        ("head", &["mind", "skull", "brain", "top", "chief", "leader", "boss"]),
        ("hand", &["palm", "fist", "grip", "paw", "mitt", "help", "aid"]),
        ("foot", &["paw", "hoof", "step", "base", "bottom", "walk", "tread"]),
        ("eye", &["optic", "peeper", "sight", "vision", "look", "watch", "view"]),
        ("ear", &["hearing", "lobe", "sound", "listen", "audit", "heark", "sense"]),
        ("mouth", &["lips", "jaw", "voice", "speech", "talk", "taste", "grin"]),
        ("nose", &["snout", "beak", "smell", "scent", "sniff", "whiff", "proboscis"]),
        ("hair", &["locks", "mane", "strands", "fur", "tress", "curls", "wigs"]),
        ("clothes", &["gear", "attire", "dress", "outfit", "garb", "wear", "suit"]),
        ("shoe", &["boot", "sneaker", "footwear", "sandal", "kick", "pump", "heel"]),
        ("hat", &["cap", "lid", "bonnet", "helm", "crown", "hood", "beanie"]),
        ("bag", &["sack", "pack", "tote", "pouch", "case", "luggage", "purse"]),
        ("tool", &["gadget", "device", "gear", "kit", "rig", "utensil", "implement"]),
        ("car", &["auto", "vehicle", "ride", "motor", "wheels", "sedan", "truck"]),
        ("bus", &["coach", "shuttle", "transport", "transit", "van", "carrier", "liner"]),
        ("train", &["rail", "metro", "subway", "tram", "loco", "tube", "express"]),
        ("plane", &["jet", "flight", "aircraft", "craft", "air", "flyer", "glider"]),
        ("ship", &["boat", "vessel", "ferry", "yacht", "liner", "craft", "barge"]),
        ("road", &["street", "way", "path", "route", "lane", "highway", "track"]),
        ("map", &["chart", "plan", "guide", "plot", "atlas", "sketch", "grid"]),
        ("flag", &["banner", "ensign", "standard", "colors", "pennant", "sign", "signal"]),
        ("sign", &["mark", "token", "symbol", "clue", "hint", "signal", "omen"]),
        ("name", &["label", "title", "tag", "term", "handle", "call", "brand"]),
        ("word", &["term", "text", "phrase", "note", "chat", "voice", "speech"]),
        ("letter", &["mail", "note", "char", "symbol", "sign", "memo", "message"]),
        ("paper", &["sheet", "page", "doc", "file", "scroll", "card", "print"]),
        ("pen", &["biro", "marker", "quill", "stylus", "writer", "ink", "stick"]),
        ("desk", &["table", "bench", "counter", "stand", "bureau", "worktop", "station"]),
        ("chair", &["seat", "stool", "bench", "throne", "sofa", "perch", "recliner"]),
        ("room", &["space", "hall", "chamber", "area", "spot", "den", "zone"]),
        ("door", &["gate", "entry", "exit", "portal", "way", "hatch", "opening"]),
        ("window", &["glass", "pane", "opening", "view", "screen", "sight", "outlook"]),
        ("wall", &["barrier", "fence", "side", "partition", "block", "brick", "panel"]),
        ("floor", &["ground", "deck", "level", "base", "bottom", "stage", "mat"]),
        ("roof", &["top", "cover", "canopy", "ceiling", "dome", "shelter", "peak"]),
        ("garden", &["yard", "lawn", "park", "patch", "plot", "field", "green"]),
        ("park", &["garden", "green", "ground", "field", "lot", "reserve", "common"]),
        ("shop", &["store", "mart", "market", "stall", "outlet", "boutique", "stand"]),
        // Listed upstream as "f fair", which could never match a single query token.
        ("market", &["bazaar", "mart", "fair", "trade", "exchange", "shop", "sale"]),
        ("bank", &["vault", "fund", "reserve", "store", "treasury", "safe", "coffer"]),
        ("hospital", &["clinic", "ward", "infirmary", "center", "er", "care", "med"]),
        ("doctor", &["medic", "physician", "doc", "surgeon", "healer", "vet", "specialist"]),
        ("nurse", &["medic", "aide", "carer", "attendant", "helper", "sister", "matron"]),
        ("police", &["cops", "law", "force", "guard", "officer", "patrol", "badge"]),
        ("fireman", &["fighter", "saver", "hero", "crew", "rescue", "chief", "brigade"]),
        ("teacher", &["tutor", "coach", "guide", "mentor", "prof", "master", "trainer"]),
        ("student", &["pupil", "learner", "scholar", "trainee", "novice", "kid", "junior"]),
        ("parent", &["guardian", "father", "mother", "folks", "kin", "elder", "ancestor"]),
        ("child", &["kid", "youth", "tot", "baby", "junior", "minor", "offspring"]),
        ("baby", &["infant", "tot", "newborn", "babe", "child", "tiny", "little"]),
        ("man", &["guy", "male", "gent", "fellow", "chap", "dude", "bloke"]),
        ("woman", &["lady", "female", "girl", "dame", "miss", "madam", "gal"]),
        ("boy", &["lad", "youth", "kid", "son", "junior", "chap", "youngster"]),
        ("girl", &["lass", "miss", "maid", "daughter", "lady", "femme", "sis"]),
        ("king", &["ruler", "monarch", "lord", "chief", "crown", "royal", "sire"]),
        ("queen", &["ruler", "royal", "lady", "monarch", "crown", "sovereign", "matriarch"]),
        ("prince", &["royal", "heir", "son", "noble", "lord", "youth", "lad"]),
        ("princess", &["royal", "lady", "heir", "noble", "girl", "daughter", "dame"]),
        ("castle", &["fort", "palace", "keep", "tower", "citadel", "hall", "manor"]),
        ("magic", &["spell", "charm", "trick", "witchery", "power", "wizardry", "mystic"]),
        ("ghost", &["spirit", "soul", "spook", "shade", "phantom", "wraith", "specter"]),
        ("monster", &["beast", "fiend", "creature", "brute", "demon", "freak", "giant"]),
        ("alien", &["stranger", "foreigner", "martian", "visitor", "outsider", "unknown", "being"]),
        ("robot", &["bot", "machine", "android", "cyborg", "mech", "automaton", "drone"]),
        ("hero", &["champ", "star", "idol", "saver", "legend", "victor", "leader"]),
        ("villain", &["bad guy", "fiend", "criminal", "foe", "enemy", "crook", "rogue"]),
        ("war", &["fight", "battle", "conflict", "combat", "strife", "clash", "attack"]),
        ("peace", &["calm", "quiet", "rest", "truce", "harmony", "order", "silence"]),
        ("freedom", &["liberty", "rights", "release", "relief", "choice", "free", "power"]),
        ("justice", &["law", "right", "fairness", "truth", "honor", "equity", "rule"]),
        ("hope", &["wish", "dream", "faith", "trust", "desire", "goal", "belief"]),
        ("fix", &["repair", "mend", "solve", "restore", "patch", "correct"]),
        ("make", &["create", "build", "construct", "produce", "generate", "form"]),
        ("get", &["acquire", "obtain", "fetch", "buy", "receive", "gain"]),
        ("finance", &["financial", "economy", "money", "fiscal", "monetary", "capital", "investment"]),
];

lazy_static! {
    static ref ENGLISH_SYNONYMS: Arc<SynonymTable> = Arc::new(SynonymTable::from_pairs(
        ENGLISH.iter().map(|(word, alts)| (*word, alts.iter().copied())),
    ));
}

/// Word to ordered alternatives. Keys are matched exactly against query tokens.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    pub fn english() -> Arc<Self> {
        Arc::clone(&ENGLISH_SYNONYMS)
    }

    pub fn from_pairs<I, K, A, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(word, alts)| (word.into(), alts.into_iter().map(Into::into).collect()))
            .collect();
        Self { entries }
    }

    /// Read a JSON object mapping each word to an array of alternatives.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let entries: HashMap<String, Vec<String>> = serde_json::from_str(&text)?;
        Ok(Self { entries })
    }

    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The input tokens plus the stemmed synonyms of every token that is a table key.
    pub fn expand(&self, tokens: &[String]) -> BTreeSet<String> {
        let mut expanded: BTreeSet<String> = tokens.iter().cloned().collect();
        for alts in tokens.iter().filter_map(|t| self.get(t)) {
            expanded.extend(alts.iter().map(|alt| stem(alt)));
        }
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn expansion_adds_stemmed_synonyms() {
        let table = SynonymTable::from_pairs([("fix", ["repairs", "mending"])]);
        let out = table.expand(&tokens(&["fix", "car"]));
        let expected: BTreeSet<String> =
            ["fix", "car", "repair", "mend"].iter().map(|s| s.to_string()).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn expansion_is_a_superset() {
        let table = SynonymTable::english();
        let input = tokens(&["fast", "car", "fast car", "zzz"]);
        let out = table.expand(&input);
        assert!(input.iter().all(|t| out.contains(t)));
        assert!(out.contains("rapid"));
        assert!(out.contains("vehicle"));
    }

    #[test]
    fn no_entries_means_no_change() {
        let table = SynonymTable::default();
        let out = table.expand(&tokens(&["a", "b", "a"]));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn market_expands_to_single_word_fair() {
        let out = SynonymTable::english().expand(&tokens(&["market"]));
        assert!(out.contains("fair"));
        assert!(out.iter().all(|t| !t.contains(' ')));
    }

    #[test]
    fn english_table_keeps_last_definition() {
        let table = SynonymTable::english();
        let show = table.get("show").unwrap();
        assert_eq!(show.len(), 6);
        assert_eq!(show[0], "display");
    }
}
