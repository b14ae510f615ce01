//! Page fixtures shared by the Bandcamp extractor tests.

/// An album/track page in the layout Bandcamp serves for releases.
pub fn release_page(title: &str, band: &str, trackinfo: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title} | {band}</title></head>
<body>
<div id="name-section">
    <h2 class="trackTitle">
        {title}
    </h2>
    <h3 style="margin:0px;">by
        <span itemprop="byArtist">
            <a href="https://band.bandcamp.com">{band}</a>
        </span>
    </h3>
</div>
<div id="tralbumArt">
    <a class="popupImage" href="https://f4.bcbits.com/img/a1_10.jpg">
        <img src="https://f4.bcbits.com/img/a1_16.jpg" alt="{title}">
    </a>
</div>
<script type="text/javascript">
var TralbumData = {{
    current: {{"title":"{title}","type":"album"}},
    is_preorder: null,
    trackinfo: {trackinfo},
    playing_from: "album page"
}};
</script>
</body>
</html>"#
    )
}

/// One `trackinfo` entry with an `mp3-128` stream.
pub fn entry(num: Option<u32>, title: &str, streaming: u8, duration: f64) -> String {
    let num = num.map(|n| format!(r#""track_num":{n},"#)).unwrap_or_default();
    format!(
        r#"{{{num}"title":"{title}","streaming":{streaming},"file":{{"mp3-128":"https://t4.bcbits.com/stream/{title}"}},"duration":{duration}}}"#
    )
}

pub fn manifest(entries: &[String]) -> String {
    format!("[{}]", entries.join(","))
}
