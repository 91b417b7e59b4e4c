pub static DETAILS_PROMPT: &str = "☝️ **Please tell us more specifics about your problem**
* MobiFlight version?
* Sim?
* Airplane?
* Used Controller?
* Did you create your config, or is it from somebody else?
* Status Sim Connection? green?

🧪 **What did you try already?**
🖼️ **Take screenshots** of your config (WIN + Shift + S) and share them here.

💡 **Good to know:**
→ [Getting started guide](https://github.com/MobiFlight/MobiFlight-Connector/wiki)
→ [How to search our Discord](https://support.discord.com/hc/en-us/articles/115000468588-Using-Search)
→ [Enable logging for more details](https://github.com/MobiFlight/MobiFlight-Connector/wiki/Providing-logs-from-MobiFlight)
→ [Taking screenshots in Windows](https://support.microsoft.com/en-us/windows/use-snipping-tool-to-capture-screenshots-00246869-1843-655f-f220-97299b865f6b)";
